use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::attendance::{AttendanceCounts, HistoryEntry, LATE_CUTOFF};

/// One day's attendance row joined with the employee's profile.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct RosterRow {
    #[schema(example = 17)]
    pub id: i32,

    #[schema(example = "2024-02-10", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "Vaishali")]
    pub station: String,

    #[schema(example = "10:31:07", value_type = Option<String>)]
    pub in_time: Option<NaiveTime>,

    #[schema(example = "18:02:44", value_type = Option<String>)]
    pub out_time: Option<NaiveTime>,

    #[schema(example = 34, nullable = true)]
    pub age: Option<i32>,

    #[schema(example = "B+", nullable = true)]
    pub blood_group: Option<String>,

    #[schema(example = "operator@station.example", nullable = true)]
    pub email: Option<String>,

    #[schema(example = "+919800000000", nullable = true)]
    pub phone_no: Option<String>,
}

impl RosterRow {
    /// Checked in after the 10:35 cutoff.
    pub fn is_late(&self) -> bool {
        self.in_time.is_some_and(|t| t > LATE_CUTOFF)
    }

    pub fn is_absent(&self) -> bool {
        self.in_time.is_none()
    }
}

/// A roster row with its recent history and running counts, as the
/// employees page shows it.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeCard {
    pub record: RosterRow,
    pub history: Vec<HistoryEntry>,
    pub counts: AttendanceCounts,
}
