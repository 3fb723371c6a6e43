//! Observability setup for Kontrakt.

pub mod tracing_setup;
