use crate::config::ServerConfig;
use crate::engine::spread::SpreadService;
use actix_cors::Cors;
use actix_web::{get, http::header, web, App, HttpResponse, HttpServer, Responder};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

/// Body for every failed request. The cause is only logged.
pub const GENERIC_ERROR: &str = "An error occurred while processing the request";

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

pub struct AppState {
    pub spread: SpreadService,
}

#[get("/price/action")]
async fn price_action(data: web::Data<Arc<AppState>>) -> impl Responder {
    match data.spread.quote().await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            error!(kind = e.kind(), "GET /price/action failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorBody { error: GENERIC_ERROR })
        }
    }
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(price_action);
}

/// CORS for the single browser origin the front-end runs on. Preflight is
/// answered by the middleware; without an origin every cross-origin request is refused.
fn cors(allowed_origin: Option<&str>) -> Cors {
    match allowed_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allowed_methods(["GET", "POST", "OPTIONS"])
            .allowed_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .supports_credentials()
            .max_age(3600),
        None => Cors::default(),
    }
}

pub struct WebServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl WebServer {
    pub fn new(config: ServerConfig, spread: SpreadService) -> Self {
        Self {
            config,
            state: Arc::new(AppState { spread }),
        }
    }

    pub async fn run(self) -> std::io::Result<()> {
        let state = self.state.clone();
        let origin = self.config.allowed_origin.clone();

        info!(
            "Starting premium spread API at http://{}:{}",
            self.config.host, self.config.port
        );

        HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(state.clone()))
                .wrap(cors(origin.as_deref()))
                .configure(routes)
        })
        .bind((self.config.host.as_str(), self.config.port))?
        .run()
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PricingConfig;
    use crate::engine::spread::tests::MockSource;
    use actix_web::dev::Service;
    use actix_web::http::{Method, StatusCode};
    use actix_web::test;
    use approx::assert_abs_diff_eq;
    use serde_json::Value;

    const ORIGIN: &str = "http://localhost:3000";

    fn state(source: MockSource) -> web::Data<Arc<AppState>> {
        web::Data::new(Arc::new(AppState {
            spread: SpreadService::new(Arc::new(source), PricingConfig::default()),
        }))
    }

    async fn get_price_action(source: MockSource) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(state(source))
                .wrap(cors(Some(ORIGIN)))
                .configure(routes),
        )
        .await;
        let req = test::TestRequest::get().uri("/price/action").to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn test_price_action_success() {
        let (status, body) = get_price_action(MockSource::Price(100.0)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["solanaPrice"], 100.0);
        assert_abs_diff_eq!(body["premium120"].as_f64().unwrap(), 2.6585, epsilon = 1e-3);
        assert_abs_diff_eq!(body["premium200"].as_f64().unwrap(), 0.0054, epsilon = 1e-3);
        assert_abs_diff_eq!(body["finalPremium"].as_f64().unwrap(), 2.6531, epsilon = 1e-3);
    }

    #[actix_web::test]
    async fn test_price_action_upstream_failure() {
        for source in [MockSource::Upstream, MockSource::Shape] {
            let (status, body) = get_price_action(source).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body["error"], GENERIC_ERROR);
            assert!(body.get("premium120").is_none());
            assert!(body.get("finalPremium").is_none());
        }
    }

    #[actix_web::test]
    async fn test_price_action_domain_failure() {
        let (status, body) = get_price_action(MockSource::Price(-1.0)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": GENERIC_ERROR }));
    }

    #[actix_web::test]
    async fn test_cors_origin_header() {
        let app = test::init_service(
            App::new()
                .app_data(state(MockSource::Price(100.0)))
                .wrap(cors(Some(ORIGIN)))
                .configure(routes),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/price/action")
            .insert_header((header::ORIGIN, ORIGIN))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            ORIGIN
        );
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }

    #[actix_web::test]
    async fn test_cors_preflight_is_answered() {
        let app = test::init_service(
            App::new()
                .app_data(state(MockSource::Price(100.0)))
                .wrap(cors(Some(ORIGIN)))
                .configure(routes),
        )
        .await;
        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/price/action")
            .insert_header((header::ORIGIN, ORIGIN))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success(), "preflight status {}", resp.status());
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            ORIGIN
        );
        assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }

    #[actix_web::test]
    async fn test_cors_other_origin_gets_no_allow_header() {
        let app = test::init_service(
            App::new()
                .app_data(state(MockSource::Price(100.0)))
                .wrap(cors(Some(ORIGIN)))
                .configure(routes),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/price/action")
            .insert_header((header::ORIGIN, "http://evil.example"))
            .to_request();
        let resp = app.call(req).await;
        let headers = match &resp {
            Ok(r) => r.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).cloned(),
            Err(e) => e.error_response().headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).cloned(),
        };
        assert!(headers.is_none());
    }

    #[actix_web::test]
    async fn test_unknown_route_is_404() {
        let app = test::init_service(App::new().app_data(state(MockSource::Price(100.0))).configure(routes)).await;
        let req = test::TestRequest::get().uri("/transaction").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
