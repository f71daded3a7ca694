//! Shared wire types for the Tally menu service.
//!
//! Everything that crosses the HTTP boundary is defined here so the core
//! engine and the server agree on one shape. Types flow downstream to
//! `TypeScript` via `ts-rs` for the browser page.
//!
//! # Modules
//!
//! - [`menu`] -- Menu items and the item mapping
//! - [`requests`] -- Update request body and per-action payloads
//! - [`responses`] -- Response envelope and session descriptor

pub mod menu;
pub mod requests;
pub mod responses;

pub use menu::{Menu, MenuItem};
pub use requests::{AddPayload, OwnerPayload, UpdateRequest};
pub use responses::{Envelope, Session};
