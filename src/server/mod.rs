//! HTTP front end.
//!
//! Routes:
//! - `GET  /Variants`                list visible variants
//! - `GET  /Variant/:name/Start`     a variant and its starting phase
//! - `POST /Variant/:name/Resolve`   resolve a posted phase
//! - `GET  /Variant/:name/Map.svg`   the map, with Etag revalidation
//! - `GET  /Variant/:name/Render`    HTML view of the starting position
//! - `GET  /health`

pub mod api_level;
pub mod handlers;
pub mod html;
pub mod hypermedia;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::catalog::CatalogService;
use crate::config::Config;
use crate::schedule::ApiLevel;

pub use api_level::CallerLevel;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub default_api_level: ApiLevel,
}

/// The variant service.
pub struct ApiServer {
    config: Config,
    state: AppState,
}

impl ApiServer {
    pub fn new(config: Config, catalog: Arc<CatalogService>) -> Self {
        let state = AppState {
            catalog,
            default_api_level: config.default_api_level,
        };
        Self { config, state }
    }

    /// Build the router
    pub fn router(&self) -> Router {
        let router = Router::new()
            .route("/health", get(handlers::health))
            .route("/Variants", get(handlers::list_variants))
            .route("/Variant/:name/Start", get(handlers::start_variant))
            .route("/Variant/:name/Resolve", post(handlers::resolve_variant))
            .route("/Variant/:name/Map.svg", get(handlers::variant_map))
            .route("/Variant/:name/Render", get(handlers::render_map))
            .layer(TraceLayer::new_for_http());

        let router = if self.config.cors_allow_any {
            router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
        } else {
            router
        };

        router.with_state(self.state.clone())
    }

    /// Start the server
    pub async fn serve(self) -> std::io::Result<()> {
        let router = self.router();
        let listener = tokio::net::TcpListener::bind(&self.config.bind_address).await?;

        info!("Variant service listening on http://{}", self.config.bind_address);
        axum::serve(listener, router).await
    }
}
