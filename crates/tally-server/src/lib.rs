//! HTTP server for Tally shared menus.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Session endpoint** (`POST /new`) handing out fresh session tokens
//! - **Menu REST endpoints** for reading and updating a session's menu
//! - **`WebSocket` endpoint** (`/ws/{session}`) streaming the menu after
//!   every change
//! - **HTML pages** (`GET /`, `GET /session/{session}`) for browsers
//!
//! # Architecture
//!
//! All state lives in a [`SessionRegistry`] injected through Axum's `State`
//! extractor. Handlers resolve the session's [`MenuStore`] and call its
//! `snapshot` or `apply`; serialization always happens on the returned copy,
//! never under a lock.
//!
//! [`SessionRegistry`]: tally_core::SessionRegistry
//! [`MenuStore`]: tally_core::MenuStore

pub mod error;
pub mod handlers;
pub mod pages;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use error::ServerError;
pub use router::build_router;
pub use server::{start_server, StartupError};
pub use state::AppState;
