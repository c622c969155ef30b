use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of both `create_website_info` and `update_website_info`.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct WebsiteInfoRequest {
    #[validate(length(min = 1, max = 255, message = "URL must be between 1 and 255 characters"))]
    pub url: String,
    #[serde(default)]
    pub interval: Option<u32>,
    #[serde(default)]
    pub regexp_pattern: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
