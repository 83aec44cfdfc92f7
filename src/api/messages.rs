use crate::{
    error::AppError,
    station::Station,
    views::{MessagesTemplate, PageContext, render_page},
};
use actix_web::HttpResponse;

/// Messages page
#[utoipa::path(
    get,
    path = "/messages",
    responses(
        (status = 200, description = "Messages page", body = String, content_type = "text/html")
    ),
    tag = "Messages"
)]
pub async fn messages(station: Station) -> Result<HttpResponse, AppError> {
    render_page(&MessagesTemplate {
        ctx: PageContext::new(station.as_str(), "messages"),
    })
}
