//! Backend worker: owns the tokio runtime and the HTTP client.

pub mod runtime;
