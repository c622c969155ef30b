use axum::{
    routing::{patch, post},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn website_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create_website_info", post(controller::create_website_info))
        .route("/update_website_info", patch(controller::update_website_info))
}
