use crate::config::Config;
use actix_web::{
    FromRequest, HttpRequest,
    cookie::{Cookie, SameSite},
    dev::Payload,
    web::Data,
};
use futures::future::{Ready, ready};
use std::fmt;

pub const STATION_COOKIE: &str = "station";

/// The station the calling operator is working on. Read from the station
/// cookie, falling back to the configured default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station(String);

impl Station {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trimmed, non-empty names only.
    pub fn parse(raw: &str) -> Option<Self> {
        let name = raw.trim();
        if name.is_empty() {
            None
        } else {
            Some(Station(name.to_string()))
        }
    }

    pub fn cookie(&self) -> Cookie<'static> {
        Cookie::build(STATION_COOKIE, self.0.clone())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .finish()
    }

    /// `Set-Cookie` header value. The name is percent-encoded, so `;`, `,`
    /// and quotes come back intact when the request side decodes it.
    pub fn set_cookie_value(&self) -> String {
        self.cookie().encoded().to_string()
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromRequest for Station {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(station) = req
            .cookie(STATION_COOKIE)
            .and_then(|c| Station::parse(c.value()))
        {
            return ready(Ok(station));
        }

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => {
                return ready(Err(actix_web::error::ErrorInternalServerError(
                    "Config missing",
                )));
            }
        };

        ready(Ok(Station(config.default_station.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn falls_back_to_default_station() {
        let req = TestRequest::default()
            .app_data(Data::new(Config::for_tests()))
            .to_http_request();

        let station = Station::extract(&req).await.unwrap();
        assert_eq!(station.as_str(), "Vaishali");
    }

    #[actix_web::test]
    async fn cookie_overrides_default() {
        let req = TestRequest::default()
            .app_data(Data::new(Config::for_tests()))
            .cookie(Cookie::new(STATION_COOKIE, "Dwarka"))
            .to_http_request();

        let station = Station::extract(&req).await.unwrap();
        assert_eq!(station.as_str(), "Dwarka");
    }

    #[actix_web::test]
    async fn blank_cookie_is_ignored() {
        let req = TestRequest::default()
            .app_data(Data::new(Config::for_tests()))
            .cookie(Cookie::new(STATION_COOKIE, "  "))
            .to_http_request();

        let station = Station::extract(&req).await.unwrap();
        assert_eq!(station.as_str(), "Vaishali");
    }

    #[actix_web::test]
    async fn missing_config_is_an_error() {
        let req = TestRequest::default().to_http_request();
        assert!(Station::extract(&req).await.is_err());
    }

    #[actix_web::test]
    async fn encoded_cookie_keeps_separators() {
        let station = Station::parse("Sector 9; Gate 2").unwrap();
        let header_value = station.set_cookie_value();
        let pair = header_value.split(';').next().unwrap();
        assert_eq!(pair, "station=Sector%209%3B%20Gate%202");

        let req = TestRequest::default()
            .app_data(Data::new(Config::for_tests()))
            .insert_header((actix_web::http::header::COOKIE, pair))
            .to_http_request();

        let station = Station::extract(&req).await.unwrap();
        assert_eq!(station.as_str(), "Sector 9; Gate 2");
    }

    #[test]
    fn set_cookie_value_carries_attributes() {
        let value = Station::parse("Dwarka").unwrap().set_cookie_value();
        assert!(value.starts_with("station=Dwarka;"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Lax"));
        assert!(value.contains("Path=/"));
    }

    #[test]
    fn parse_trims_and_rejects_empty() {
        assert_eq!(Station::parse("  Dwarka ").unwrap().as_str(), "Dwarka");
        assert!(Station::parse("").is_none());
        assert!(Station::parse("   ").is_none());
    }
}
