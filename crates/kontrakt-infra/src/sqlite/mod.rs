//! SQLite-backed persistence.

pub mod contract;
pub mod pool;
