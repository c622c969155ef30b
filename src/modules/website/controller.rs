use axum::{extract::State, http::StatusCode, Json};
use regex::Regex;
use std::sync::Arc;
use validator::Validate;

use crate::modules::website::{
    model::NewSite,
    schema::{ErrorResponse, MessageResponse, WebsiteInfoRequest},
};
use crate::modules::StoreError;
use crate::services::url_validator::get_formatted_url;
use crate::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);

pub async fn create_website_info(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WebsiteInfoRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let url = validated_url(&req)?;
    validate_pattern(req.regexp_pattern.as_deref())?;

    if state.sites.get_site(&url).await.map_err(internal)?.is_some() {
        return Err(already_exists(&url));
    }

    let new_site = NewSite {
        url: url.clone(),
        interval: req.interval,
        regexp_pattern: req.regexp_pattern,
    };

    if let Err(e) = state.sites.create_site(&new_site).await {
        if let StoreError::Database(sqlx::Error::Database(db_err)) = &e {
            if db_err.is_unique_violation() {
                return Err(already_exists(&url));
            }
        }
        return Err(internal(e));
    }

    let site = state
        .sites
        .get_site(&url)
        .await
        .map_err(internal)?
        .ok_or_else(|| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(format!("Website with URL {} was not stored", url))),
            )
        })?;

    state.scheduler.register(site).await;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Website added to monitoring")),
    ))
}

/// Changes are stored only; a running site task keeps its old settings until
/// the next start of the application.
pub async fn update_website_info(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WebsiteInfoRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    if req.interval.is_none() && req.regexp_pattern.is_none() {
        return Err(bad_request("Interval or regexp_pattern should be filled"));
    }

    let url = validated_url(&req)?;
    validate_pattern(req.regexp_pattern.as_deref())?;

    let mut site = state
        .sites
        .get_site(&url)
        .await
        .map_err(internal)?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(format!("Website with URL {} not found", url))),
            )
        })?;

    if req.interval.is_some() {
        site.interval = req.interval;
    }
    if req.regexp_pattern.is_some() {
        site.regexp_pattern = req.regexp_pattern;
    }

    state.sites.update_site(&site).await.map_err(internal)?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::new(
            "Website info changed, it will be applied during the next run of the app",
        )),
    ))
}

fn validated_url(req: &WebsiteInfoRequest) -> Result<String, ApiError> {
    if let Err(e) = req.validate() {
        return Err(bad_request(e.to_string()));
    }
    get_formatted_url(&req.url).map_err(|_| bad_request(format!("Invalid URL: {}", req.url)))
}

fn validate_pattern(pattern: Option<&str>) -> Result<(), ApiError> {
    match pattern {
        Some(pattern) => Regex::new(pattern)
            .map(|_| ())
            .map_err(|_| bad_request("Invalid regexp_pattern")),
        None => Ok(()),
    }
}

fn already_exists(url: &str) -> ApiError {
    bad_request(format!("Website with URL {} already exists", url))
}

fn bad_request(message: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

fn internal(e: StoreError) -> ApiError {
    tracing::error!("Website store error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(e.to_string())),
    )
}
