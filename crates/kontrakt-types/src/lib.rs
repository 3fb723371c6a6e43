//! Shared domain types for Kontrakt.
//!
//! This crate contains the core domain types used across the Kontrakt
//! intake service: the buyer-field catalog, line items, the form session
//! record and its state machine tags, events, prompts, the contract payload
//! and summary record, configuration, and the associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod contract;
pub mod error;
pub mod event;
pub mod field;
pub mod item;
pub mod reply;
pub mod session;
