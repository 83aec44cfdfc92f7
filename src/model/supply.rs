use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumString};
use utoipa::ToSchema;

pub const MAX_SUPPLY_VOLUME: f64 = 10.0;
pub const MAX_BIN_VOLUME: f64 = 50.0;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct SupplyItem {
    pub id: i32,
    pub station: String,
    #[schema(example = "2024-02-10", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "Hand sanitizer")]
    pub item_name: String,
    #[schema(example = 2.5)]
    pub current_volume: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Bin {
    pub id: i32,
    pub station: String,
    #[schema(example = "2024-02-10", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "Platform 1 dry waste")]
    pub bin_name: String,
    #[schema(example = 38.0)]
    pub current_volume: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    Red,
    Yellow,
}

fn percent(volume: f64, max: f64) -> f64 {
    volume / max * 100.0
}

/// Supplies alert when running low: red under 25%, yellow from 25% up to
/// but not including 50%.
pub fn supply_alert(volume: f64) -> Option<Alert> {
    let pct = percent(volume, MAX_SUPPLY_VOLUME);
    if pct < 25.0 {
        Some(Alert::Red)
    } else if pct < 50.0 {
        Some(Alert::Yellow)
    } else {
        None
    }
}

/// Bins alert when filling up: red over 75%, yellow from 50% to 75% inclusive.
pub fn bin_alert(volume: f64) -> Option<Alert> {
    let pct = percent(volume, MAX_BIN_VOLUME);
    if pct > 75.0 {
        Some(Alert::Red)
    } else if pct >= 50.0 {
        Some(Alert::Yellow)
    } else {
        None
    }
}

impl SupplyItem {
    pub fn percent(&self) -> f64 {
        percent(self.current_volume, MAX_SUPPLY_VOLUME)
    }

    pub fn alert(&self) -> Option<Alert> {
        supply_alert(self.current_volume)
    }
}

impl Bin {
    pub fn percent(&self) -> f64 {
        percent(self.current_volume, MAX_BIN_VOLUME)
    }

    pub fn alert(&self) -> Option<Alert> {
        bin_alert(self.current_volume)
    }
}

/// Red and yellow buckets of one classified list. Items with no alert are
/// dropped.
#[derive(Debug, Clone)]
pub struct AlertBuckets<T> {
    pub red: Vec<T>,
    pub yellow: Vec<T>,
}

impl<T> AlertBuckets<T> {
    pub fn split(items: Vec<T>, classify: impl Fn(&T) -> Option<Alert>) -> Self {
        let mut buckets = AlertBuckets {
            red: Vec::new(),
            yellow: Vec::new(),
        };
        for item in items {
            match classify(&item) {
                Some(Alert::Red) => buckets.red.push(item),
                Some(Alert::Yellow) => buckets.yellow.push(item),
                None => {}
            }
        }
        buckets
    }
}

/// Tables whose `current_volume` an operator may edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum VolumeKind {
    Supply,
    Bin,
}

impl VolumeKind {
    pub fn update_sql(self) -> &'static str {
        match self {
            VolumeKind::Supply => {
                "UPDATE supplies SET current_volume = $1 \
                 WHERE id = $2 AND date = $3 AND LOWER(station) = LOWER($4)"
            }
            VolumeKind::Bin => {
                "UPDATE bins SET current_volume = $1 \
                 WHERE id = $2 AND date = $3 AND LOWER(station) = LOWER($4)"
            }
        }
    }
}

/// Accepts finite, non-negative numbers only.
pub fn parse_volume(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}
