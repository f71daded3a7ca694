//! Rejection taxonomy for menu updates.
//!
//! Every variant is a local validation failure. A rejected call never
//! leaves a partial mutation behind and the store stays usable.

/// Reasons a menu update is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
    /// The action payload is malformed or misses a required field.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// `add` targeted an item name that is already on the menu.
    #[error("item already exists: {0}")]
    AlreadyExists(String),

    /// The targeted item is not on the menu.
    #[error("item not found: {0}")]
    NotFound(String),

    /// The action string is not one of the recognized actions.
    #[error("unknown action: {0}")]
    UnknownAction(String),
}
