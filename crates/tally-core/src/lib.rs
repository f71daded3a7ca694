//! Concurrency-safe menu engine for the Tally service.
//!
//! A menu is a named collection of counters, each attributed to the owners
//! that contributed to it. Many request handlers read and mutate the same
//! menu at once; this crate guarantees every mutation is applied
//! all-or-nothing and that readers never see a half-applied change.
//!
//! # Modules
//!
//! - [`action`] -- The four update actions and their payload decoding
//! - [`store`] -- [`MenuStore`], one menu behind a reader-writer lock
//! - [`registry`] -- [`SessionRegistry`], token to menu mapping
//! - [`config`] -- Typed service configuration loaded from YAML
//! - [`error`] -- [`MenuError`], the rejection taxonomy

pub mod action;
pub mod config;
pub mod error;
pub mod registry;
pub mod store;

pub use action::Action;
pub use config::{ConfigError, TallyConfig};
pub use error::MenuError;
pub use registry::SessionRegistry;
pub use store::MenuStore;
