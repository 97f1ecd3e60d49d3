pub mod handlers;
mod types;

pub use types::{EditRequest, ErrorResponse, ImageResponse, SwapRequest};

use crate::{
    config::Config,
    provider::HttpChatClient,
    relay::Relay,
    Result,
};
use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Builds the application router. Split from [`run`] so tests can drive it
/// in-process with a mock provider.
pub fn router(state: handlers::AppState, max_body_mb: usize) -> Router {
    Router::new()
        .route("/api/outfit-swap", post(handlers::outfit_swap))
        .route("/api/edit-image", post(handlers::edit_image))
        // Bodies carry base64-encoded images; axum's 2 MB default is far too small.
        .layer(DefaultBodyLimit::max(max_body_mb * 1024 * 1024))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let chat = HttpChatClient::new(config.provider.clone())?;
    let relay = Relay::new(Arc::new(chat), config.provider.model.clone());

    let app_state = handlers::AppState {
        relay: Arc::new(relay),
    };

    let app = router(app_state, config.server.max_body_mb);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
