//! Request bodies accepted by the update endpoint.
//!
//! The action payload stays an untyped [`serde_json::Value`] until the core
//! knows which action it belongs to; each action then decodes its own
//! payload type.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Body of `POST /api/{session}/update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UpdateRequest {
    /// Name of the item the action targets.
    pub item: String,
    /// One of `add`, `remove`, `increment`, `decrement`.
    pub action: String,
    /// Action-specific payload. Ignored by `remove`.
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Payload of the `add` action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AddPayload {
    /// Display name of the new item. Must not be empty.
    #[serde(default)]
    pub name: String,
}

/// Payload of the `increment` and `decrement` actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct OwnerPayload {
    /// Owner the change is attributed to. Must not be empty.
    #[serde(default)]
    pub owner: String,
}
