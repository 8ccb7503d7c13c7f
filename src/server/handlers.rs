//! Route handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};

use super::api_level::CallerLevel;
use super::hypermedia::{phase_item, variant_item, variants_item, Item};
use super::{html, AppState};
use crate::error::CatalogError;
use crate::render::{RenderPhase, RenderVariant, ResolveRequest};

/// Cache lifetime of map images, in seconds.
const MAP_MAX_AGE: u32 = 3600;

pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

/// GET /Variants
pub async fn list_variants(
    State(state): State<AppState>,
    CallerLevel(level): CallerLevel,
) -> Result<Json<Item<Vec<Item<RenderVariant>>>>, CatalogError> {
    let variants = state.catalog.list_variants(level)?;
    Ok(Json(variants_item(variants)))
}

/// GET /Variant/:name/Start
pub async fn start_variant(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Item<RenderVariant>>, CatalogError> {
    let variant = state.catalog.start_variant(&name)?;
    Ok(Json(variant_item(variant)))
}

/// POST /Variant/:name/Resolve
pub async fn resolve_variant(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<ResolveRequest>, JsonRejection>,
) -> Result<Json<Item<RenderPhase>>, CatalogError> {
    // Unknown names are 404 even when the body is bad.
    state.catalog.variant(&name)?;
    let Json(request) = payload?;
    let phase = state.catalog.resolve_variant(&name, request)?;
    Ok(Json(phase_item(&name, phase)))
}

/// GET /Variant/:name/Map.svg
pub async fn variant_map(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<Response, CatalogError> {
    let map = state.catalog.variant_map(&name)?;
    let cache_headers = [
        (header::CONTENT_TYPE, "image/svg+xml".to_string()),
        (header::ETAG, map.etag()),
        (header::CACHE_CONTROL, format!("max-age={}", MAP_MAX_AGE)),
    ];

    let fresh = headers
        .get_all(header::IF_NONE_MATCH)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| map.matches(value));
    if fresh {
        return Ok((StatusCode::NOT_MODIFIED, cache_headers).into_response());
    }

    Ok((cache_headers, map.bytes.to_vec()).into_response())
}

/// GET /Variant/:name/Render
pub async fn render_map(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Html<String>, CatalogError> {
    let variant = state.catalog.start_variant(&name)?;
    Ok(Html(html::variant_page(&variant)))
}
