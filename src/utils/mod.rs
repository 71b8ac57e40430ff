//! Utility modules for NOTA CLI
//!
//! Shared configuration management and file logging.

pub mod config;
pub mod logger;
