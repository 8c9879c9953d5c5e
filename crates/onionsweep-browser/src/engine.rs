use crate::error::{CaptureError, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use futures::StreamExt;
use std::path::Path;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Render-engine options for one capture session.
///
/// Named fields instead of raw browser flags; anything not listed keeps the
/// engine default.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// SOCKS5 endpoint as `host:port`. All session traffic egresses here.
    pub proxy_addr: Option<String>,
    pub window_width: u32,
    pub window_height: u32,
    pub user_agent: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            proxy_addr: None,
            window_width: 1366,
            window_height: 768,
            user_agent: None,
        }
    }
}

/// One isolated headless browser session.
///
/// Owns the browser process and its CDP handler task; [`Self::close`]
/// releases both. A session is scoped to a single capture and never shared.
pub struct CaptureSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    user_agent: Option<String>,
}

impl CaptureSession {
    /// Launch a fresh headless browser configured from `config`.
    pub async fn launch(config: &SessionConfig) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(config.window_width, config.window_height)
            .arg("--ignore-certificate-errors")
            .arg("--disable-dev-shm-usage")
            .arg("--mute-audio");

        if let Some(addr) = &config.proxy_addr {
            // Chrome resolves hostnames at the SOCKS endpoint; loopback must
            // not bypass the proxy.
            builder = builder
                .arg(format!("--proxy-server=socks5://{addr}"))
                .arg("--proxy-bypass-list=<-loopback>");
        }

        let browser_config = builder.build().map_err(CaptureError::Launch)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| CaptureError::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        Ok(Self {
            browser,
            handler_task,
            user_agent: config.user_agent.clone(),
        })
    }

    /// Navigate to `url`, wait the fixed settle delay, and capture a
    /// full-surface PNG into memory.
    pub async fn capture(&self, url: &str, settle: Duration) -> Result<Vec<u8>> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| CaptureError::Navigation(e.to_string()))?;

        if let Some(ua) = &self.user_agent {
            page.set_user_agent(ua)
                .await
                .map_err(|e| CaptureError::Navigation(e.to_string()))?;
        }

        page.goto(url)
            .await
            .map_err(|e| CaptureError::Navigation(e.to_string()))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| CaptureError::Navigation(e.to_string()))?;

        // Let client-side rendering settle before rasterizing.
        tokio::time::sleep(settle).await;

        page.screenshot(
            ScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .full_page(true)
                .build(),
        )
        .await
        .map_err(|e| CaptureError::Screenshot(e.to_string()))
    }

    /// Tear the session down: close the browser process and stop the
    /// handler task.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::debug!("browser close: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            tracing::debug!("browser wait: {}", e);
        }
        self.handler_task.abort();
    }
}

/// Capture `url` into `dest` through one throwaway session.
///
/// Navigation, settle, and rasterization share a single timeout that is
/// independent of any fetch-stage timeout. The PNG is fully in memory
/// before the file write, so a failure never leaves a partial artifact.
/// The session is released before returning, success or failure.
pub async fn capture_to_file(
    url: &str,
    dest: &Path,
    config: &SessionConfig,
    timeout: Duration,
    settle: Duration,
) -> Result<()> {
    tracing::debug!(host = %page_host(url).unwrap_or_default(), "launching capture session");

    let session = CaptureSession::launch(config).await?;

    let captured = tokio::time::timeout(timeout, session.capture(url, settle)).await;
    session.close().await;

    let png = match captured {
        Ok(result) => result?,
        Err(_) => return Err(CaptureError::Timeout(timeout)),
    };

    std::fs::write(dest, png)?;
    Ok(())
}

/// Host component of `url`, for log context.
pub fn page_host(url: &str) -> Option<String> {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_host() {
        assert_eq!(
            page_host("http://example.onion/path").as_deref(),
            Some("example.onion")
        );
        assert_eq!(
            page_host("https://sub.example.com:8080/").as_deref(),
            Some("sub.example.com")
        );
        assert_eq!(page_host("not a url"), None);
    }

    #[test]
    fn test_session_config_default() {
        let config = SessionConfig::default();
        assert!(config.proxy_addr.is_none());
        assert_eq!(config.window_width, 1366);
        assert_eq!(config.window_height, 768);
    }
}
