use crate::{models::StationForm, station::Station};
use actix_web::{HttpRequest, HttpResponse, http::header, web};
use tracing::info;

/// Landing page
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 302, description = "Redirects to the dashboard")
    ),
    tag = "Station"
)]
pub async fn index() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/dashboard"))
        .finish()
}

/// Switch the active station for this client
#[utoipa::path(
    post,
    path = "/set-station",
    request_body(content = StationForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Back to the referring page, or `/`")
    ),
    tag = "Station"
)]
pub async fn set_station(req: HttpRequest, form: web::Form<StationForm>) -> HttpResponse {
    let target = req
        .headers()
        .get(header::REFERER)
        .and_then(|h| h.to_str().ok())
        .filter(|r| !r.is_empty())
        .unwrap_or("/")
        .to_string();

    let mut response = HttpResponse::Found();
    response.insert_header((header::LOCATION, target));

    // blank submissions keep whatever station the client already has
    if let Some(station) = form.station.as_deref().and_then(Station::parse) {
        info!(station = %station, "Station updated");
        response.append_header((header::SET_COOKIE, station.set_cookie_value()));
    }

    response.finish()
}
