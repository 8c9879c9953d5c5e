//! Onionsweep Scanner - the concurrent scan pipeline.
//!
//! This crate provides the scanning infrastructure: target list parsing,
//! URL normalization, the SOCKS5-bound proxy transport, the per-target
//! fetch/capture pipeline, the bounded worker pool with its join barrier,
//! and reporting.
//!
//! # Example
//!
//! ```rust,ignore
//! use onionsweep_scanner::{pool, ScanPipeline};
//! use std::sync::Arc;
//!
//! let pipeline = Arc::new(ScanPipeline::new(fetcher, capturer, shot_dir, log));
//! let records = pool::run_scan_pool(targets, workers, move |id, target| {
//!     let pipeline = pipeline.clone();
//!     async move { pipeline.scan(id, &target).await }
//! })
//! .await;
//! ```

pub mod capture;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod pipeline;
pub mod pool;
pub mod proxy;
pub mod report;
pub mod runlog;
pub mod storage;
pub mod targets;
pub mod verify;

// Re-export commonly used types
pub use capture::{Capturer, HeadlessCapturer};
pub use error::{FetchError, Result, ScanError};
pub use fetch::{FetchSuccess, Fetcher, HttpFetcher};
pub use normalize::normalize_url;
pub use pipeline::ScanPipeline;
pub use pool::run_scan_pool;
pub use proxy::ProxyTransport;
pub use runlog::RunLog;
pub use targets::read_targets;
pub use verify::verify_proxy;
