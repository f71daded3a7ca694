//! REST API endpoint handlers for the Tally server.
//!
//! Every successful response is wrapped in an [`Envelope`].
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/new` | Register a fresh session |
//! | `GET` | `/api/{session}/menu` | Current menu of a session |
//! | `POST` | `/api/{session}/update` | Apply one update action |
//!
//! Unknown session tokens are provisioned on first access by every
//! endpoint, so a client can pick its own token.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use tally_core::Action;
use tally_types::{Envelope, Menu, Session, UpdateRequest};
use tracing::warn;

use crate::error::ServerError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /new -- fresh session
// ---------------------------------------------------------------------------

/// Register a session under a freshly generated token.
pub async fn create_session(State(state): State<Arc<AppState>>) -> Json<Envelope<Session>> {
    let (uri, store) = state.registry.create(None).await;
    let menu = store.snapshot().await;
    Json(Envelope::ok(Session { uri, menu }))
}

// ---------------------------------------------------------------------------
// GET /api/{session}/menu
// ---------------------------------------------------------------------------

/// Return the session's item mapping.
pub async fn get_menu(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
) -> Json<Envelope<Menu>> {
    let store = state.registry.resolve(&session).await;
    Json(Envelope::ok(store.snapshot().await))
}

// ---------------------------------------------------------------------------
// POST /api/{session}/update
// ---------------------------------------------------------------------------

/// Apply one update action and return the post-update item mapping.
///
/// # Request Body
///
/// `{"item": "coffee", "action": "increment", "data": {"owner": "alice"}}`
pub async fn update_menu(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    payload: Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<Json<Envelope<Menu>>, ServerError> {
    let Json(request) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;

    let action = Action::try_from(&request).inspect_err(|e| {
        warn!(%session, item = %request.item, error = %e, "update rejected");
    })?;

    let store = state.registry.resolve(&session).await;
    let menu = store.apply(&request.item, action).await.inspect_err(|e| {
        warn!(%session, item = %request.item, error = %e, "update rejected");
    })?;

    Ok(Json(Envelope::ok(menu)))
}
