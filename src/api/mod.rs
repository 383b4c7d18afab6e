// Request extractors that report malformed input as JSON `ApiError`s
// instead of axum's plain-text rejections.

use axum::extract::{FromRequest, FromRequestParts};
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::database::products::ProductFilter;
use crate::error::ApiError;
use crate::types::PageRequest;

pub mod views;

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Path parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Trimmed, non-empty value of an optional string field
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// `?page&per_page&category_id&search` for product listings. Numbers are
/// parsed leniently: blank or malformed values fall back to their defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub category_id: Option<String>,
    pub search: Option<String>,
}

impl ListQuery {
    pub fn page_request(&self, api: &ApiConfig) -> PageRequest {
        PageRequest::new(
            parse_number(&self.page),
            parse_number(&self.per_page),
            api.default_per_page,
            api.max_per_page,
        )
    }

    pub fn filter(&self) -> ProductFilter {
        ProductFilter {
            category_id: parse_number(&self.category_id),
            search: present(&self.search).map(str::to_string),
        }
    }
}

fn parse_number(value: &Option<String>) -> Option<i64> {
    present(value).and_then(|v| v.parse().ok())
}
