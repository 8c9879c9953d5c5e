//! Headless render-and-capture engine for proxied page screenshots.
//!
//! Each capture launches an isolated browser session routed through the
//! configured SOCKS5 proxy, renders the page, and persists a PNG. Sessions
//! are never reused across captures.

pub mod engine;
pub mod error;

pub use engine::{capture_to_file, page_host, CaptureSession, SessionConfig};
pub use error::{CaptureError, Result};
