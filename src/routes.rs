use crate::api::{dashboard, employee, messages, station, supplies};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(station::index)))
        .service(web::resource("/set-station").route(web::post().to(station::set_station)))
        .service(web::resource("/dashboard").route(web::get().to(dashboard::dashboard)))
        .service(web::resource("/employees").route(web::get().to(employee::list_employees)))
        // /mark-attendance/{id}/{in|out}
        .service(
            web::resource("/mark-attendance/{id}/{type}")
                .route(web::post().to(employee::mark_attendance)),
        )
        .service(
            web::scope("/supplies")
                // /supplies
                .service(web::resource("").route(web::get().to(supplies::supplies)))
                // /supplies/update/{supply|bin}/{id}
                .service(
                    web::resource("/update/{type}/{id}")
                        .route(web::post().to(supplies::update_volume)),
                ),
        )
        .service(web::resource("/messages").route(web::get().to(messages::messages)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, db::lazy_pool, station::STATION_COOKIE};
    use actix_web::{
        App,
        cookie::Cookie,
        http::{StatusCode, header},
        test,
        web::Data,
    };

    macro_rules! app {
        () => {{
            let config = Config::for_tests();
            test::init_service(
                App::new()
                    .app_data(Data::new(lazy_pool(&config)))
                    .app_data(Data::new(config))
                    .configure(configure),
            )
            .await
        }};
    }

    fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> &str {
        resp.headers()
            .get(header::LOCATION)
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default()
    }

    #[actix_web::test]
    async fn root_redirects_to_dashboard() {
        let app = app!();
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/dashboard");
    }

    #[actix_web::test]
    async fn set_station_returns_to_referer_with_cookie() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/set-station")
            .insert_header((header::REFERER, "/supplies?date=2024-02-10"))
            .set_form([("station", "Dwarka")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/supplies?date=2024-02-10");
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == STATION_COOKIE)
            .expect("station cookie set");
        assert_eq!(cookie.value(), "Dwarka");
    }

    #[actix_web::test]
    async fn blank_station_is_ignored() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/set-station")
            .set_form([("station", "   ")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/");
        assert_eq!(resp.response().cookies().count(), 0);
    }

    #[actix_web::test]
    async fn selected_station_scopes_later_pages() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/set-station")
            .set_form([("station", "dwarka")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == STATION_COOKIE)
            .map(|c| c.into_owned())
            .expect("station cookie set");

        let req = test::TestRequest::get()
            .uri("/messages")
            .cookie(cookie)
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let html = String::from_utf8_lossy(&body);

        assert!(html.contains("No messages for dwarka."));
        assert!(!html.contains("Vaishali"));
    }

    #[actix_web::test]
    async fn station_with_separators_survives_raw_cookie_headers() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/set-station")
            .set_form([("station", "Sector 9; Gate 2")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        let set_cookie = resp
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .expect("station cookie set")
            .to_string();

        // replay only name=value, the way a browser does
        let pair = set_cookie.split(';').next().unwrap_or_default();
        let req = test::TestRequest::get()
            .uri("/messages")
            .insert_header((header::COOKIE, pair))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let html = String::from_utf8_lossy(&body);

        assert!(html.contains("No messages for Sector 9; Gate 2."));
    }

    #[actix_web::test]
    async fn messages_default_to_configured_station() {
        let app = app!();
        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/messages").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let html = String::from_utf8_lossy(&body);
        assert!(html.contains("No messages for Vaishali."));
        assert!(html.contains(r#"href="/messages" class="active""#));
    }

    #[actix_web::test]
    async fn unknown_attendance_type_still_succeeds() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/mark-attendance/12/bogus")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({ "success": true }));
    }

    #[actix_web::test]
    async fn non_numeric_employee_id_answers_with_json() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/mark-attendance/abc/in")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({ "success": false }));
    }

    #[actix_web::test]
    async fn update_volume_rejects_unknown_type() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/supplies/update/crate/1")
            .set_form([("current_volume", "3")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(test::read_body(resp).await, "Invalid type");
    }

    #[actix_web::test]
    async fn update_volume_rejects_bad_numbers() {
        let app = app!();
        for raw in ["-1", "abc", ""] {
            let req = test::TestRequest::post()
                .uri("/supplies/update/supply/1")
                .set_form([("current_volume", raw)])
                .to_request();
            let resp = test::call_service(&app, req).await;

            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "volume {raw:?}");
            assert_eq!(test::read_body(resp).await, "Invalid volume");
        }
    }

    #[actix_web::test]
    async fn malformed_date_is_rejected() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/employees?date=10-02-2024")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn empty_date_falls_back_to_today() {
        let app = app!();
        for uri in ["/supplies?date=", "/employees?date="] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            // 200 with a database, 500 without one; never a rejected query
            assert_ne!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[actix_web::test]
    async fn cookie_station_is_echoed_in_station_form() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/messages")
            .cookie(Cookie::new(STATION_COOKIE, "Rajiv"))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let html = String::from_utf8_lossy(&body);
        assert!(html.contains(r#"name="station" value="Rajiv""#));
    }
}
