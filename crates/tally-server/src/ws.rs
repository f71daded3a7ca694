//! `WebSocket` handler for live menu updates.
//!
//! Clients connect to `GET /ws/{session}` and first receive the current
//! menu, then a JSON-encoded menu each time an update changes it. Every
//! frame carries the same [`Envelope`] shape as the REST responses.
//!
//! If a client falls behind, lagged snapshots are skipped and the client
//! resumes from the most recent one. Since every frame is a full menu, no
//! state is lost by skipping.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tally_core::MenuStore;
use tally_types::{Envelope, Menu};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and begin
/// streaming the session's menu.
///
/// # Route
///
/// `GET /ws/{session}`
pub async fn ws_menu(
    ws: WebSocketUpgrade,
    Path(session): Path<String>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let store = state.registry.resolve(&session).await;
    ws.on_upgrade(move |socket| handle_ws(socket, session, store))
}

/// Handle the `WebSocket` lifecycle: send the current menu, then forward
/// every published snapshot as a text frame.
async fn handle_ws(mut socket: WebSocket, session: String, store: Arc<MenuStore>) {
    debug!(%session, "WebSocket client connected");

    // Subscribe before taking the snapshot so no update falls in between.
    let mut rx = store.subscribe();
    let initial = store.snapshot().await;
    if let Err(e) = send_menu(&mut socket, &initial).await {
        warn!(%session, error = %e, "WebSocket initial send failed");
        return;
    }

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(menu) => {
                        if let Err(e) = send_menu(&mut socket, &menu).await {
                            warn!(%session, error = %e, "WebSocket send failed");
                            return;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        debug!(%session, skipped = n, "WebSocket client lagged, skipping ahead");
                    }
                    Err(RecvError::Closed) => {
                        debug!(%session, "Update channel closed, shutting down WebSocket");
                        return;
                    }
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(%session, "WebSocket client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if let Err(e) = socket.send(Message::Pong(data)).await {
                            warn!(%session, error = %e, "WebSocket pong failed");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!(%session, "WebSocket error: {e}");
                        return;
                    }
                    _ => {
                        // Clients update through the REST endpoint.
                    }
                }
            }
        }
    }
}

/// Serialize `menu` into an envelope and send it as one text frame.
async fn send_menu(socket: &mut WebSocket, menu: &Menu) -> Result<(), axum::Error> {
    let json = serde_json::to_string(&Envelope::ok(menu)).map_err(axum::Error::new)?;
    socket.send(Message::Text(json.into())).await
}
