//! Capture stage adapter over the headless render engine.

use async_trait::async_trait;
use onionsweep_browser::{capture_to_file, CaptureError, SessionConfig};
use onionsweep_core::CaptureConfig;
use std::path::Path;
use std::time::Duration;

/// The capture seam of the scan pipeline.
#[async_trait]
pub trait Capturer: Send + Sync {
    /// Render `url` through an isolated proxied session and persist a PNG
    /// at `dest`.
    async fn capture(&self, url: &str, dest: &Path) -> Result<(), CaptureError>;
}

/// Production capturer: one throwaway browser session per call, routed
/// through the run's SOCKS5 endpoint.
pub struct HeadlessCapturer {
    session: SessionConfig,
    timeout: Duration,
    settle: Duration,
}

impl HeadlessCapturer {
    pub fn new(config: &CaptureConfig, proxy_addr: &str, user_agent: &str) -> Self {
        Self {
            session: SessionConfig {
                proxy_addr: Some(proxy_addr.to_string()),
                window_width: config.window_width,
                window_height: config.window_height,
                user_agent: Some(user_agent.to_string()),
            },
            timeout: Duration::from_secs(config.navigation_timeout_secs),
            settle: Duration::from_millis(config.settle_delay_ms),
        }
    }
}

#[async_trait]
impl Capturer for HeadlessCapturer {
    async fn capture(&self, url: &str, dest: &Path) -> Result<(), CaptureError> {
        capture_to_file(url, dest, &self.session, self.timeout, self.settle).await
    }
}
