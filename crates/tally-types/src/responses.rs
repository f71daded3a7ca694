//! Response envelope and session descriptor.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::menu::Menu;

/// Status string carried by every successful response.
pub const STATUS_OK: &str = "ok";

/// Wrapper around every successful response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Always [`STATUS_OK`] for successful responses.
    pub status: String,
    /// The response payload.
    pub data: T,
}

impl<T> Envelope<T> {
    /// Wrap `data` in a successful envelope.
    pub fn ok(data: T) -> Self {
        Self {
            status: String::from(STATUS_OK),
            data,
        }
    }
}

/// A session as returned by `POST /new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Session {
    /// Opaque session token, used as the `{session}` path segment.
    pub uri: String,
    /// The session's menu at creation time.
    pub menu: Menu,
}
