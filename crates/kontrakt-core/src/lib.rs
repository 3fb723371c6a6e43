//! Business logic and port definitions for Kontrakt.
//!
//! This crate owns the form session state machine, the session registry, and
//! the "ports" (collaborator traits) that the infrastructure layer
//! implements. It depends only on `kontrakt-types` -- never on
//! `kontrakt-infra` or any database/HTTP crate.

pub mod form;
pub mod generator;
pub mod registry;
pub mod repository;
pub mod service;
pub mod store;
