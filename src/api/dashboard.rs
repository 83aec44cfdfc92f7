use crate::{
    api::employee::fetch_roster,
    error::AppError,
    model::{
        employee::RosterRow,
        supply::{AlertBuckets, Bin, MAX_BIN_VOLUME, MAX_SUPPLY_VOLUME, SupplyItem},
    },
    station::Station,
    utils::date_utils,
    views::{DashboardTemplate, PageContext, render_page},
};
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::{debug, instrument};

const FETCH_FAILED: &str = "Error fetching dashboard data";

pub async fn supplies_by_name(
    pool: &PgPool,
    station: &Station,
    date: NaiveDate,
) -> Result<Vec<SupplyItem>, sqlx::Error> {
    sqlx::query_as::<_, SupplyItem>(
        r#"
        SELECT id::int4 AS id, station::text AS station, date, item_name::text AS item_name,
               current_volume::float8 AS current_volume
        FROM supplies
        WHERE LOWER(station) = LOWER($1) AND date = $2
        ORDER BY item_name
        "#,
    )
    .bind(station.as_str())
    .bind(date)
    .fetch_all(pool)
    .await
}

pub async fn bins_by_name(
    pool: &PgPool,
    station: &Station,
    date: NaiveDate,
) -> Result<Vec<Bin>, sqlx::Error> {
    sqlx::query_as::<_, Bin>(
        r#"
        SELECT id::int4 AS id, station::text AS station, date, bin_name::text AS bin_name,
               current_volume::float8 AS current_volume
        FROM bins
        WHERE LOWER(station) = LOWER($1) AND date = $2
        ORDER BY bin_name
        "#,
    )
    .bind(station.as_str())
    .bind(date)
    .fetch_all(pool)
    .await
}

/// Today's exceptions for the active station
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Late and absent employees, low supplies and full bins", body = String, content_type = "text/html"),
        (status = 500, description = "Error fetching dashboard data")
    ),
    tag = "Dashboard"
)]
#[instrument(skip(pool))]
pub async fn dashboard(
    pool: web::Data<PgPool>,
    station: Station,
) -> Result<HttpResponse, AppError> {
    let today = date_utils::today();

    let roster = fetch_roster(pool.get_ref(), &station, today)
        .await
        .map_err(AppError::backend(FETCH_FAILED))?;

    let supplies = supplies_by_name(pool.get_ref(), &station, today)
        .await
        .map_err(AppError::backend(FETCH_FAILED))?;

    let bins = bins_by_name(pool.get_ref(), &station, today)
        .await
        .map_err(AppError::backend(FETCH_FAILED))?;

    let (late_employees, absent_employees) = late_and_absent(roster);
    let supply_alerts = AlertBuckets::split(supplies, SupplyItem::alert);
    let bin_alerts = AlertBuckets::split(bins, Bin::alert);

    debug!(
        late = late_employees.len(),
        absent = absent_employees.len(),
        red_supplies = supply_alerts.red.len(),
        red_bins = bin_alerts.red.len(),
        "Dashboard assembled"
    );

    render_page(&DashboardTemplate {
        ctx: PageContext::new(station.as_str(), "dashboard"),
        today,
        late_employees,
        absent_employees,
        red_supplies: supply_alerts.red,
        yellow_supplies: supply_alerts.yellow,
        red_bins: bin_alerts.red,
        yellow_bins: bin_alerts.yellow,
        max_supply_volume: MAX_SUPPLY_VOLUME,
        max_bin_volume: MAX_BIN_VOLUME,
    })
}

/// Splits a roster into late check-ins and missing check-ins. Order is kept.
fn late_and_absent(roster: Vec<RosterRow>) -> (Vec<RosterRow>, Vec<RosterRow>) {
    let mut late = Vec::new();
    let mut absent = Vec::new();
    for row in roster {
        if row.is_absent() {
            absent.push(row);
        } else if row.is_late() {
            late.push(row);
        }
    }
    (late, absent)
}
