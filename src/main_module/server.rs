//! HTTP server initialization and routing

use axum::{
    extract::Request,
    http::{header, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::documents::configure_documents_routes;
use crate::records::configure_records_routes;
use crate::shared::config::ServerConfig;
use crate::shared::state::AppState;

use super::{health_check, shutdown_signal};

pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Answers every `OPTIONS` request with an empty 200, preflight or not.
async fn options_short_circuit(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(req).await
}

pub fn build_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .merge(configure_records_routes())
        .merge(configure_documents_routes())
        .with_state(app_state)
        .layer(middleware::from_fn(options_short_circuit))
        .layer(create_cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Address the server listens on: every interface, configured port.
pub fn listen_addr(config: &ServerConfig) -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], config.port))
}

pub async fn run_axum_server(app_state: Arc<AppState>) -> std::io::Result<()> {
    let addr = listen_addr(&app_state.config.server);
    let app = build_router(app_state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!(
                "Failed to bind to {}: {} - is another instance running?",
                addr, e
            );
            return Err(e);
        }
    };
    info!("Server starting on {}", addr);
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(std::io::Error::other)
}
