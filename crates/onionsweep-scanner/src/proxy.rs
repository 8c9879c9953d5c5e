//! Proxy transport: the single egress point for every networked stage.

use crate::error::{Result, ScanError};
use std::time::Duration;

/// Shared transport handle, constructed once per run.
///
/// The HTTP client dials exclusively through the configured SOCKS5
/// endpoint, with hostname resolution happening at the proxy (`socks5h`) so
/// onion hostnames never touch local DNS. There is no fallback to a direct
/// connection under any condition. The client is safe to share read-only
/// across workers; the capture stage receives the same endpoint address and
/// routes its own browser sessions through it independently.
#[derive(Debug, Clone)]
pub struct ProxyTransport {
    client: reqwest::Client,
    proxy_addr: String,
    timeout: Duration,
}

impl ProxyTransport {
    /// Build the transport for `proxy_addr` (`host:port`).
    ///
    /// Fails when the SOCKS5 dialer cannot be constructed (malformed
    /// address); this is fatal to the whole run.
    pub fn new(proxy_addr: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        let proxy = reqwest::Proxy::all(format!("socks5h://{proxy_addr}"))
            .map_err(|e| ScanError::ProxyInit(e.to_string()))?;

        // Onion services commonly present self-signed certificates.
        let client = reqwest::Client::builder()
            .proxy(proxy)
            .timeout(timeout)
            .user_agent(user_agent)
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| ScanError::ProxyInit(e.to_string()))?;

        Ok(Self {
            client,
            proxy_addr: proxy_addr.to_string(),
            timeout,
        })
    }

    /// The shared HTTP client.
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// The SOCKS5 endpoint, for render sessions that dial it themselves.
    pub fn proxy_addr(&self) -> &str {
        &self.proxy_addr
    }

    /// The fixed per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_construction() {
        let transport = ProxyTransport::new(
            "127.0.0.1:9150",
            Duration::from_secs(30),
            "onionsweep-test",
        )
        .expect("construct transport");
        assert_eq!(transport.proxy_addr(), "127.0.0.1:9150");
        assert_eq!(transport.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_malformed_proxy_addr_is_fatal() {
        let result = ProxyTransport::new(
            "not a proxy address",
            Duration::from_secs(30),
            "onionsweep-test",
        );
        assert!(matches!(result, Err(ScanError::ProxyInit(_))));
    }
}
