//! Shared helpers for the end-to-end harness tests.

pub mod env;

pub use env::EnvScope;
