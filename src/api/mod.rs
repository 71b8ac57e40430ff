//! API modules for NOTA CLI
//!
//! HTTP client and payload types for the auth and chat endpoints.

pub mod client;
