//! Update actions and their payload decoding.
//!
//! The wire carries an action name plus an untyped payload. [`Action::parse`]
//! turns that pair into a typed action, validating the payload fields the
//! action needs. Anything it rejects never reaches the store.

use serde::de::DeserializeOwned;
use tally_types::{AddPayload, OwnerPayload, UpdateRequest};

use crate::error::MenuError;

/// One state transition on a single menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Create the item with a zero count.
    Add {
        /// Display name supplied by the client. Never empty.
        name: String,
    },
    /// Delete the item. Succeeds whether or not the item exists.
    Remove,
    /// Add one to the item, attributed to `owner`.
    Increment {
        /// Contributing owner. Never empty.
        owner: String,
    },
    /// Take one from the item, attributed to `owner`.
    Decrement {
        /// Contributing owner. Never empty.
        owner: String,
    },
}

impl Action {
    /// Decode an action from its wire name and payload.
    ///
    /// `remove` ignores its payload entirely.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::UnknownAction`] for an unrecognized action name
    /// and [`MenuError::InvalidPayload`] when the payload cannot be decoded
    /// or a required field is empty.
    pub fn parse(action: &str, data: &serde_json::Value) -> Result<Self, MenuError> {
        match action {
            "add" => {
                let payload: AddPayload = decode(data)?;
                let name = require("name", payload.name)?;
                Ok(Self::Add { name })
            }
            "remove" => Ok(Self::Remove),
            "increment" => {
                let payload: OwnerPayload = decode(data)?;
                let owner = require("owner", payload.owner)?;
                Ok(Self::Increment { owner })
            }
            "decrement" => {
                let payload: OwnerPayload = decode(data)?;
                let owner = require("owner", payload.owner)?;
                Ok(Self::Decrement { owner })
            }
            other => Err(MenuError::UnknownAction(other.to_owned())),
        }
    }

    /// Wire name of the action.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Remove => "remove",
            Self::Increment { .. } => "increment",
            Self::Decrement { .. } => "decrement",
        }
    }
}

impl TryFrom<&UpdateRequest> for Action {
    type Error = MenuError;

    fn try_from(request: &UpdateRequest) -> Result<Self, Self::Error> {
        Self::parse(&request.action, &request.data)
    }
}

/// Decode a payload, treating a missing (`null`) payload as all defaults.
fn decode<T>(data: &serde_json::Value) -> Result<T, MenuError>
where
    T: DeserializeOwned + Default,
{
    if data.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(data.clone()).map_err(|e| MenuError::InvalidPayload(e.to_string()))
}

fn require(field: &str, value: String) -> Result<String, MenuError> {
    if value.trim().is_empty() {
        return Err(MenuError::InvalidPayload(format!("{field} is required")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_add_with_name() {
        let action = Action::parse("add", &json!({"name": "coffee"})).unwrap();
        assert_eq!(
            action,
            Action::Add {
                name: String::from("coffee")
            }
        );
        assert_eq!(action.name(), "add");
    }

    #[test]
    fn add_without_name_is_invalid() {
        for data in [json!({}), json!(null), json!({"name": ""}), json!({"name": "  "})] {
            let err = Action::parse("add", &data).unwrap_err();
            assert!(matches!(err, MenuError::InvalidPayload(_)), "{data}");
        }
    }

    #[test]
    fn wrongly_typed_payload_is_invalid() {
        let err = Action::parse("increment", &json!({"owner": 7})).unwrap_err();
        assert!(matches!(err, MenuError::InvalidPayload(_)));

        let err = Action::parse("decrement", &json!("alice")).unwrap_err();
        assert!(matches!(err, MenuError::InvalidPayload(_)));
    }

    #[test]
    fn remove_ignores_payload() {
        assert_eq!(Action::parse("remove", &json!(42)).unwrap(), Action::Remove);
        assert_eq!(Action::parse("remove", &json!(null)).unwrap(), Action::Remove);
    }

    #[test]
    fn owner_actions_require_owner() {
        let inc = Action::parse("increment", &json!({"owner": "alice"})).unwrap();
        assert_eq!(
            inc,
            Action::Increment {
                owner: String::from("alice")
            }
        );

        let err = Action::parse("decrement", &json!({})).unwrap_err();
        assert_eq!(err, MenuError::InvalidPayload(String::from("owner is required")));
    }

    #[test]
    fn unknown_action_is_rejected() {
        let err = Action::parse("double", &json!({})).unwrap_err();
        assert_eq!(err, MenuError::UnknownAction(String::from("double")));
    }

    #[test]
    fn converts_from_update_request() {
        let request = UpdateRequest {
            item: String::from("coffee"),
            action: String::from("increment"),
            data: json!({"owner": "bob"}),
        };
        let action = Action::try_from(&request).unwrap();
        assert_eq!(action.name(), "increment");
    }
}
