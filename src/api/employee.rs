use crate::{
    error::AppError,
    model::{
        attendance::{AttendanceMark, CheckIn, HistoryEntry, group_history, tally_counts},
        employee::{EmployeeCard, RosterRow},
    },
    models::{AttendanceAck, DateQuery},
    station::Station,
    utils::date_utils::{self, history_window},
    views::{EmployeesTemplate, PageContext, render_page},
};
use actix_web::{HttpResponse, web};
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use tracing::{debug, error, instrument};

const FETCH_FAILED: &str = "Error fetching employees data";

/// Attendance rows for one station and day, joined with profile fields,
/// ordered by employee id.
pub async fn fetch_roster(
    pool: &PgPool,
    station: &Station,
    date: NaiveDate,
) -> Result<Vec<RosterRow>, sqlx::Error> {
    sqlx::query_as::<_, RosterRow>(
        r#"
        SELECT
            e.id::int4 AS id,
            e.date,
            e.station::text AS station,
            e.in_time,
            e.out_time,
            d.age::int4 AS age,
            d.blood_group::text AS blood_group,
            d.email::text AS email,
            d.phone_no::text AS phone_no
        FROM employee e
        JOIN emp_data d ON e.id = d.id AND LOWER(e.station) = LOWER(d.station)
        WHERE LOWER(e.station) = LOWER($1) AND e.date = $2
        ORDER BY e.id
        "#,
    )
    .bind(station.as_str())
    .bind(date)
    .fetch_all(pool)
    .await
}

/// Check-in history between two days inclusive, newest first.
pub async fn fetch_history(
    pool: &PgPool,
    station: &Station,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<HistoryEntry>, sqlx::Error> {
    sqlx::query_as::<_, HistoryEntry>(
        r#"
        SELECT id::int4 AS id, date, in_time
        FROM employee
        WHERE LOWER(station) = LOWER($1)
          AND date >= $2
          AND date <= $3
        ORDER BY date DESC
        "#,
    )
    .bind(station.as_str())
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await
}

/// Every check-in up to and including `until`, for the running counts.
pub async fn fetch_check_ins(
    pool: &PgPool,
    station: &Station,
    until: NaiveDate,
) -> Result<Vec<CheckIn>, sqlx::Error> {
    sqlx::query_as::<_, CheckIn>(
        r#"
        SELECT id::int4 AS id, in_time
        FROM employee
        WHERE LOWER(station) = LOWER($1)
          AND date <= $2
        "#,
    )
    .bind(station.as_str())
    .bind(until)
    .fetch_all(pool)
    .await
}

/// Writes `time` into the in or out column of one employee's row for `date`.
/// Returns the number of rows touched.
pub async fn apply_mark(
    pool: &PgPool,
    station: &Station,
    employee_id: i32,
    mark: AttendanceMark,
    date: NaiveDate,
    time: NaiveTime,
) -> Result<u64, sqlx::Error> {
    let done = sqlx::query(mark.update_sql())
        .bind(time)
        .bind(employee_id)
        .bind(date)
        .bind(station.as_str())
        .execute(pool)
        .await?;
    Ok(done.rows_affected())
}

/// Employee attendance page
#[utoipa::path(
    get,
    path = "/employees",
    params(DateQuery),
    responses(
        (status = 200, description = "Attendance for the day with weekly history and running counts", body = String, content_type = "text/html"),
        (status = 400, description = "Malformed date"),
        (status = 500, description = "Error fetching employees data")
    ),
    tag = "Employee"
)]
#[instrument(skip(pool))]
pub async fn list_employees(
    pool: web::Data<PgPool>,
    station: Station,
    query: web::Query<DateQuery>,
) -> Result<HttpResponse, AppError> {
    let today = date_utils::today();
    let selected_date = query.date.unwrap_or(today);

    let roster = fetch_roster(pool.get_ref(), &station, selected_date)
        .await
        .map_err(AppError::backend(FETCH_FAILED))?;

    let (from, to) = history_window(today);
    let history = fetch_history(pool.get_ref(), &station, from, to)
        .await
        .map_err(AppError::backend(FETCH_FAILED))?;

    let check_ins = fetch_check_ins(pool.get_ref(), &station, today)
        .await
        .map_err(AppError::backend(FETCH_FAILED))?;

    debug!(
        roster = roster.len(),
        history = history.len(),
        check_ins = check_ins.len(),
        "Fetched employee data"
    );

    let history = group_history(history);
    let counts = tally_counts(&check_ins);

    let cards = roster
        .into_iter()
        .map(|record| EmployeeCard {
            history: history.get(&record.id).cloned().unwrap_or_default(),
            counts: counts.get(&record.id).copied().unwrap_or_default(),
            record,
        })
        .collect();

    render_page(&EmployeesTemplate {
        ctx: PageContext::new(station.as_str(), "employees"),
        cards,
        selected_date,
        today,
    })
}

/// Stamp today's check-in or check-out time
#[utoipa::path(
    post,
    path = "/mark-attendance/{id}/{type}",
    params(
        ("id" = String, Path, description = "Employee ID; a non-numeric id answers `success: false`"),
        ("type" = String, Path, description = "`in` or `out`; anything else is ignored")
    ),
    responses(
        (status = 200, description = "`success` is false when the id is not a number or the update failed", body = AttendanceAck)
    ),
    tag = "Employee"
)]
#[instrument(skip(pool))]
pub async fn mark_attendance(
    pool: web::Data<PgPool>,
    station: Station,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (raw_id, kind) = path.into_inner();

    let Ok(mark) = kind.parse::<AttendanceMark>() else {
        debug!(employee_id = %raw_id, kind = %kind, "Unknown attendance type, nothing to update");
        return HttpResponse::Ok().json(AttendanceAck { success: true });
    };

    let Ok(employee_id) = raw_id.trim().parse::<i32>() else {
        error!(employee_id = %raw_id, mark = mark.as_ref(), "Employee id is not a number");
        return HttpResponse::Ok().json(AttendanceAck { success: false });
    };

    let result = apply_mark(
        pool.get_ref(),
        &station,
        employee_id,
        mark,
        date_utils::today(),
        date_utils::now_hms(),
    )
    .await;

    match result {
        Ok(rows) => {
            debug!(employee_id, mark = mark.as_ref(), rows, "Attendance marked");
            HttpResponse::Ok().json(AttendanceAck { success: true })
        }
        Err(e) => {
            error!(error = %e, employee_id, mark = mark.as_ref(), "Failed to mark attendance");
            HttpResponse::Ok().json(AttendanceAck { success: false })
        }
    }
}
