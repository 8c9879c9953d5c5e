//! Onionsweep Core - Foundation crate for the onionsweep scanner.
//!
//! This crate provides the shared configuration, error, and record types
//! that the scanner and CLI crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Configuration error types using thiserror
//! - [`config`] - TOML-based configuration with environment overrides
//! - [`types`] - Shared record types (`ScanRecord`, `Timestamp`, `RunId`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{CaptureConfig, OutputConfig, ProxyConfig, ScanConfig, ScanningConfig};
pub use error::{ConfigError, ConfigResult};
pub use types::{RunId, ScanRecord, Timestamp};
