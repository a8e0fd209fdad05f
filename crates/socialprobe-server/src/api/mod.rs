mod scrape;

use std::future::Future;
use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use socialprobe_core::{supported_platforms, PlatformInfo};
use socialprobe_scraper::ProfileScraper;
use tokio::sync::Mutex;
use tokio::task::JoinError;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    scraper: Arc<ProfileScraper>,
    /// Held for the whole of a scrape; one scrape runs at a time.
    scrape_lock: Arc<Mutex<()>>,
}

impl AppState {
    #[must_use]
    pub fn new(scraper: ProfileScraper) -> Self {
        Self {
            scraper: Arc::new(scraper),
            scrape_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Runs `job` on its own task while holding the scrape lock.
    ///
    /// The lock guard moves into the spawned task, so a dropped caller (client
    /// disconnect) does not release the lock while the scrape is still running.
    /// A panic inside the scrape surfaces as the `JoinError` rather than
    /// tearing down the connection.
    async fn run_scrape<F, Fut, T>(&self, job: F) -> Result<T, JoinError>
    where
        F: FnOnce(Arc<ProfileScraper>) -> Fut,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let guard = Arc::clone(&self.scrape_lock).lock_owned().await;
        let scrape = job(Arc::clone(&self.scraper));
        tokio::spawn(async move {
            let _guard = guard;
            scrape.await
        })
        .await
    }
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct RootData {
    message: &'static str,
    status: &'static str,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    service: &'static str,
}

#[derive(Debug, Serialize)]
struct PlatformsData {
    platforms: &'static [PlatformInfo],
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "unsupported_platform" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/platforms", get(platforms))
        .route("/api/scrape", post(scrape::scrape_url))
        .route(
            "/api/scrape/{platform}/{username}",
            get(scrape::scrape_profile),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn root() -> impl IntoResponse {
    Json(RootData {
        message: "Social Media Scraper API",
        status: "running",
    })
}

async fn health() -> impl IntoResponse {
    Json(HealthData {
        status: "healthy",
        service: "social-media-scraper",
    })
}

async fn platforms() -> impl IntoResponse {
    Json(PlatformsData {
        platforms: supported_platforms(),
    })
}
