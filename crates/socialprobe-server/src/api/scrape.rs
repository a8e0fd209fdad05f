use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use socialprobe_core::{Platform, ProfileResult};

use super::{ApiError, AppState};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct ScrapeRequest {
    #[serde(default)]
    url: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ScrapeResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<ProfileResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ScrapeResponse {
    fn from_result(result: ProfileResult) -> Self {
        match result.error.clone() {
            Some(error) => Self::failure(error),
            None => Self {
                success: true,
                data: Some(result),
                error: None,
            },
        }
    }

    fn failure(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// `POST /api/scrape`. Scrape failures are reported in the body with 200.
pub(super) async fn scrape_url(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<ScrapeRequest>,
) -> Result<Json<ScrapeResponse>, ApiError> {
    let url = request.url.trim().to_owned();
    if url.is_empty() {
        return Err(ApiError::new(req_id.0, "bad_request", "URL is required"));
    }

    let joined = state
        .run_scrape(move |scraper| async move { scraper.scrape_url(&url).await })
        .await;

    let response = match joined {
        Ok(result) => ScrapeResponse::from_result(result),
        Err(e) => {
            tracing::error!(error = %e, "scrape task failed");
            ScrapeResponse::failure(format!("Scraping failed: {e}"))
        }
    };
    Ok(Json(response))
}

/// `GET /api/scrape/{platform}/{username}`. Scrape failures map to 500.
pub(super) async fn scrape_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path((platform, username)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let platform: Platform = platform.parse().map_err(|_| {
        ApiError::new(
            req_id.0.clone(),
            "unsupported_platform",
            "Unsupported platform",
        )
    })?;

    let joined = state
        .run_scrape(move |scraper| async move {
            scraper.scrape_profile(platform.key(), &username).await
        })
        .await;

    match joined {
        Ok(Ok(result)) => match result.error {
            Some(error) => Err(ApiError::new(req_id.0, "scrape_failed", error)),
            None => Ok(Json(ScrapeResponse::from_result(result))),
        },
        Ok(Err(e)) => Err(ApiError::new(
            req_id.0,
            "unsupported_platform",
            e.to_string(),
        )),
        Err(e) => {
            tracing::error!(error = %e, "scrape task failed");
            Err(ApiError::new(
                req_id.0,
                "internal_error",
                format!("Scraping failed: {e}"),
            ))
        }
    }
}
