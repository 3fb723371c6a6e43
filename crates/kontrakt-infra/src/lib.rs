//! Infrastructure layer for Kontrakt.
//!
//! Contains implementations of the ports defined in `kontrakt-core`:
//! SQLite storage, the HTTP document-generator client, the filesystem
//! document store, and the TOML config loader.

pub mod config;
pub mod filesystem;
pub mod generator;
pub mod sqlite;
