//! Caller API-level extraction.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{header, request::Parts, HeaderMap},
};
use serde::Deserialize;

use super::AppState;
use crate::error::CatalogError;
use crate::schedule::ApiLevel;

/// Header carrying an explicit API level.
pub const API_LEVEL_HEADER: &str = "x-api-level";

/// Query parameter carrying an explicit API level.
pub const API_LEVEL_PARAM: &str = "api-level";

/// The API level a request is served at.
///
/// An explicit `X-Api-Level` header wins, then the `api-level` query
/// parameter. Browsers asking for HTML are served at the HTML API level so
/// they see every scheduled variant; everyone else gets the configured
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerLevel(pub ApiLevel);

#[derive(Deserialize)]
struct LevelQuery {
    #[serde(rename = "api-level")]
    api_level: Option<String>,
}

#[async_trait]
impl FromRequestParts<AppState> for CallerLevel {
    type Rejection = CatalogError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(value) = parts.headers.get(API_LEVEL_HEADER) {
            let value = value
                .to_str()
                .map_err(|_| CatalogError::MalformedRequest("X-Api-Level is not valid text".into()))?;
            return parse_level(value).map(CallerLevel);
        }

        let query = Query::<LevelQuery>::try_from_uri(&parts.uri).ok();
        if let Some(value) = query.and_then(|Query(q)| q.api_level) {
            return parse_level(&value).map(CallerLevel);
        }

        if accepts_html(&parts.headers) {
            return Ok(CallerLevel(state.catalog.html_api_level().max(state.default_api_level)));
        }

        Ok(CallerLevel(state.default_api_level))
    }
}

fn parse_level(value: &str) -> Result<ApiLevel, CatalogError> {
    value
        .trim()
        .parse()
        .map_err(|_| CatalogError::MalformedRequest(format!("invalid API level {:?}", value)))
}

fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.contains("text/html"))
}
