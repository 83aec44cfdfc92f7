use crate::{
    error::AppError,
    model::supply::{
        Bin, MAX_BIN_VOLUME, MAX_SUPPLY_VOLUME, SupplyItem, VolumeKind, parse_volume,
    },
    models::{DateQuery, VolumeForm},
    station::Station,
    utils::date_utils::{self, month_bounds},
    views::{PageContext, SuppliesTemplate, render_page},
};
use actix_web::{HttpResponse, http::header::ContentType, web};
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::{info, instrument};

const FETCH_FAILED: &str = "Error loading supplies and bins";

pub async fn supplies_between(
    pool: &PgPool,
    station: &Station,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<SupplyItem>, sqlx::Error> {
    sqlx::query_as::<_, SupplyItem>(
        r#"
        SELECT id::int4 AS id, station::text AS station, date, item_name::text AS item_name,
               current_volume::float8 AS current_volume
        FROM supplies
        WHERE LOWER(station) = LOWER($1) AND date >= $2 AND date <= $3
        ORDER BY id
        "#,
    )
    .bind(station.as_str())
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await
}

pub async fn bins_between(
    pool: &PgPool,
    station: &Station,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<Bin>, sqlx::Error> {
    sqlx::query_as::<_, Bin>(
        r#"
        SELECT id::int4 AS id, station::text AS station, date, bin_name::text AS bin_name,
               current_volume::float8 AS current_volume
        FROM bins
        WHERE LOWER(station) = LOWER($1) AND date >= $2 AND date <= $3
        ORDER BY id
        "#,
    )
    .bind(station.as_str())
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await
}

/// Sets the volume of one supply item or bin on `date`. Returns the number
/// of rows touched.
pub async fn set_volume(
    pool: &PgPool,
    station: &Station,
    kind: VolumeKind,
    id: i32,
    volume: f64,
    date: NaiveDate,
) -> Result<u64, sqlx::Error> {
    let done = sqlx::query(kind.update_sql())
        .bind(volume)
        .bind(id)
        .bind(date)
        .bind(station.as_str())
        .execute(pool)
        .await?;
    Ok(done.rows_affected())
}

/// Supplies and bins for a day plus the raw rows of its month
#[utoipa::path(
    get,
    path = "/supplies",
    params(DateQuery),
    responses(
        (status = 200, description = "Supplies and bins page", body = String, content_type = "text/html"),
        (status = 400, description = "Malformed date"),
        (status = 500, description = "Error loading supplies and bins")
    ),
    tag = "Supplies"
)]
#[instrument(skip(pool))]
pub async fn supplies(
    pool: web::Data<PgPool>,
    station: Station,
    query: web::Query<DateQuery>,
) -> Result<HttpResponse, AppError> {
    let selected_date = query.date.unwrap_or_else(date_utils::today);
    let (month_start, month_end) = month_bounds(selected_date);
    let pool = pool.get_ref();

    let supplies_today = supplies_between(pool, &station, selected_date, selected_date)
        .await
        .map_err(AppError::backend(FETCH_FAILED))?;
    let bins_today = bins_between(pool, &station, selected_date, selected_date)
        .await
        .map_err(AppError::backend(FETCH_FAILED))?;
    let supplies_monthly = supplies_between(pool, &station, month_start, month_end)
        .await
        .map_err(AppError::backend(FETCH_FAILED))?;
    let bins_monthly = bins_between(pool, &station, month_start, month_end)
        .await
        .map_err(AppError::backend(FETCH_FAILED))?;

    render_page(&SuppliesTemplate {
        ctx: PageContext::new(station.as_str(), "supplies"),
        selected_date,
        month_start,
        month_end,
        supplies_today,
        bins_today,
        supplies_monthly,
        bins_monthly,
        max_supply_volume: MAX_SUPPLY_VOLUME,
        max_bin_volume: MAX_BIN_VOLUME,
    })
}

/// Set today's volume of a supply item or bin
#[utoipa::path(
    post,
    path = "/supplies/update/{type}/{id}",
    params(
        ("type" = String, Path, description = "`supply` or `bin`"),
        ("id" = i32, Path, description = "Supply item or bin ID")
    ),
    request_body(content = VolumeForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Volume updated", body = String),
        (status = 400, description = "Invalid type or invalid volume", body = String),
        (status = 500, description = "Failed to update volume", body = String)
    ),
    tag = "Supplies"
)]
#[instrument(skip(pool))]
pub async fn update_volume(
    pool: web::Data<PgPool>,
    station: Station,
    path: web::Path<(String, i32)>,
    form: web::Form<VolumeForm>,
) -> Result<HttpResponse, AppError> {
    let (kind, id) = path.into_inner();
    let kind: VolumeKind = kind.parse().map_err(|_| AppError::InvalidKind)?;
    let volume = parse_volume(&form.current_volume).ok_or(AppError::InvalidVolume)?;

    let rows = set_volume(pool.get_ref(), &station, kind, id, volume, date_utils::today())
        .await
        .map_err(AppError::backend("Failed to update volume"))?;

    info!(kind = kind.as_ref(), id, volume, rows, "Volume updated");

    Ok(HttpResponse::Ok()
        .insert_header(ContentType::plaintext())
        .body("Volume updated"))
}
