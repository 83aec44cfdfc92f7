use actix_web::{HttpResponse, http::header::ContentType};
use askama::Template;
use chrono::NaiveDate;

use crate::{
    error::AppError,
    model::{
        employee::{EmployeeCard, RosterRow},
        supply::{Bin, SupplyItem},
    },
};

/// Values the shared layout needs on every page.
pub struct PageContext {
    pub station: String,
    pub active_tab: &'static str,
}

impl PageContext {
    pub fn new(station: &str, active_tab: &'static str) -> Self {
        Self {
            station: station.to_string(),
            active_tab,
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub today: NaiveDate,
    pub late_employees: Vec<RosterRow>,
    pub absent_employees: Vec<RosterRow>,
    pub red_supplies: Vec<SupplyItem>,
    pub yellow_supplies: Vec<SupplyItem>,
    pub red_bins: Vec<Bin>,
    pub yellow_bins: Vec<Bin>,
    pub max_supply_volume: f64,
    pub max_bin_volume: f64,
}

#[derive(Template)]
#[template(path = "employees.html")]
pub struct EmployeesTemplate {
    pub ctx: PageContext,
    pub cards: Vec<EmployeeCard>,
    pub selected_date: NaiveDate,
    pub today: NaiveDate,
}

#[derive(Template)]
#[template(path = "supplies.html")]
pub struct SuppliesTemplate {
    pub ctx: PageContext,
    pub selected_date: NaiveDate,
    pub month_start: NaiveDate,
    pub month_end: NaiveDate,
    pub supplies_today: Vec<SupplyItem>,
    pub bins_today: Vec<Bin>,
    pub supplies_monthly: Vec<SupplyItem>,
    pub bins_monthly: Vec<Bin>,
    pub max_supply_volume: f64,
    pub max_bin_volume: f64,
}

#[derive(Template)]
#[template(path = "messages.html")]
pub struct MessagesTemplate {
    pub ctx: PageContext,
}

pub fn render_page<T: Template>(template: &T) -> Result<HttpResponse, AppError> {
    let html = template.render().map_err(|e| {
        tracing::error!(error = %e, "Template rendering failed");
        AppError::Backend("Error rendering page")
    })?;

    Ok(HttpResponse::Ok()
        .insert_header(ContentType::html())
        .body(html))
}
