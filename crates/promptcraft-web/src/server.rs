//! Axum server setup and router construction.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use axum::routing::{get, post};
use promptcraft::compiler::PromptCompiler;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::error;

use crate::api::{self, AppState};

/// Build the full axum router.
///
/// The router serves:
/// - `POST /optimize`
/// - `GET /api/targets`, `GET /health`
/// - Optional static files for the browser frontend
pub fn build_router(compiler: PromptCompiler, static_dir: Option<PathBuf>) -> Router {
    let app_state = AppState { compiler };

    // The frontend is usually served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/optimize", post(api::post_optimize))
        .route("/api/targets", get(api::get_targets))
        .route("/health", get(api::get_health))
        .with_state(app_state)
        .layer(cors);

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
}

/// Bind, start serving on a background task, and return the bound address.
pub async fn start_server(router: Router, bind_addr: SocketAddr) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!("server stopped: {e}");
        }
    });

    Ok(addr)
}
