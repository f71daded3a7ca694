//! Axum router construction for the Tally server.
//!
//! Assembles all routes (pages, REST, `WebSocket`) into a single [`Router`]
//! with CORS and request tracing enabled.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, pages, ws};

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /` -- landing page
/// - `GET /session/{session}` -- session page
/// - `POST /new` -- create a session
/// - `GET /api/{session}/menu` -- read a menu
/// - `POST /api/{session}/update` -- update a menu
/// - `GET /ws/{session}` -- live menu stream
///
/// Requests with a method a route does not serve get `405`.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Pages
        .route("/", get(pages::index))
        .route("/session/{session}", get(pages::session_page))
        // REST API
        .route("/new", post(handlers::create_session))
        .route("/api/{session}/menu", get(handlers::get_menu))
        .route("/api/{session}/update", post(handlers::update_menu))
        // WebSocket
        .route("/ws/{session}", get(ws::ws_menu))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
