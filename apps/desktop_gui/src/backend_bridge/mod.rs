//! Backend worker: owns the tokio runtime, the HTTP client, and settings storage.

pub mod adapters;
pub mod commands;
pub mod runtime;
