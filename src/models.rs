use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, de};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema)]
pub struct StationForm {
    #[schema(example = "Vaishali")]
    pub station: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateQuery {
    /// Day to show, defaults to today. An empty value counts as absent.
    #[serde(default, deserialize_with = "empty_date_as_none")]
    #[param(value_type = Option<String>, example = "2024-02-10")]
    pub date: Option<NaiveDate>,
}

fn empty_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(de::Error::custom),
    }
}

/// Raw form value, checked by `parse_volume`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct VolumeForm {
    #[schema(example = "3")]
    pub current_volume: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AttendanceAck {
    #[schema(example = true)]
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::web;

    #[test]
    fn empty_date_means_no_date() {
        let query = web::Query::<DateQuery>::from_query("date=").unwrap();
        assert_eq!(query.date, None);

        let query = web::Query::<DateQuery>::from_query("").unwrap();
        assert_eq!(query.date, None);
    }

    #[test]
    fn date_parses_as_calendar_day() {
        let query = web::Query::<DateQuery>::from_query("date=2024-02-10").unwrap();
        assert_eq!(query.date, NaiveDate::from_ymd_opt(2024, 2, 10));
    }

    #[test]
    fn malformed_date_is_an_error() {
        assert!(web::Query::<DateQuery>::from_query("date=10-02-2024").is_err());
        assert!(web::Query::<DateQuery>::from_query("date=2024-02-30").is_err());
    }
}
