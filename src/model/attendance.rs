use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{AsRefStr, EnumString};

/// Check-ins at or before this are on time.
pub const LATE_CUTOFF: NaiveTime = match NaiveTime::from_hms_opt(10, 35, 0) {
    Some(t) => t,
    None => panic!("late cutoff is not a valid time"),
};

/// Check-ins after `LATE_CUTOFF` and up to this are counted as late.
/// Anything later is neither late nor on time.
pub const LATE_LIMIT: NaiveTime = match NaiveTime::from_hms_opt(10, 45, 0) {
    Some(t) => t,
    None => panic!("late limit is not a valid time"),
};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct HistoryEntry {
    pub id: i32,
    pub date: NaiveDate,
    pub in_time: Option<NaiveTime>,
}

/// Minimal projection used for the running counts.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CheckIn {
    pub id: i32,
    pub in_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceCounts {
    pub ontime: u32,
    pub late: u32,
    pub absent: u32,
}

impl AttendanceCounts {
    fn record(&mut self, in_time: Option<NaiveTime>) {
        match in_time {
            None => self.absent += 1,
            Some(t) if t <= LATE_CUTOFF => self.ontime += 1,
            Some(t) if t <= LATE_LIMIT => self.late += 1,
            Some(_) => {}
        }
    }
}

pub fn tally_counts(rows: &[CheckIn]) -> HashMap<i32, AttendanceCounts> {
    let mut counts: HashMap<i32, AttendanceCounts> = HashMap::new();
    for row in rows {
        counts.entry(row.id).or_default().record(row.in_time);
    }
    counts
}

/// Groups history rows by employee id. Rows keep their incoming order, so a
/// date-descending query yields date-descending lists.
pub fn group_history(rows: Vec<HistoryEntry>) -> HashMap<i32, Vec<HistoryEntry>> {
    let mut grouped: HashMap<i32, Vec<HistoryEntry>> = HashMap::new();
    for row in rows {
        grouped.entry(row.id).or_default().push(row);
    }
    grouped
}

/// Which clock column a mark-attendance request stamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceMark {
    In,
    Out,
}

impl AttendanceMark {
    pub fn update_sql(self) -> &'static str {
        match self {
            AttendanceMark::In => {
                "UPDATE employee SET in_time = $1 \
                 WHERE id = $2 AND date = $3 AND LOWER(station) = LOWER($4)"
            }
            AttendanceMark::Out => {
                "UPDATE employee SET out_time = $1 \
                 WHERE id = $2 AND date = $3 AND LOWER(station) = LOWER($4)"
            }
        }
    }
}
