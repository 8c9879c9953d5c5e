//! Advisory proxy verification against the Tor check endpoint.

use crate::proxy::ProxyTransport;
use crate::runlog::RunLog;

/// Identity-check endpoint used as proof for the report.
const CHECK_URL: &str = "https://check.torproject.org/";

/// Whether the check page confirms an anonymized exit.
fn body_confirms_anonymity(body: &str) -> bool {
    let lower = body.to_lowercase();
    lower.contains("congratulations") || lower.contains("you are using tor")
}

/// Perform one diagnostic request through the transport and classify the
/// result. Failure is a warning, never fatal; the outcome is logged either
/// way.
pub async fn verify_proxy(transport: &ProxyTransport, log: &RunLog) -> bool {
    tracing::info!("verifying proxy via {}", CHECK_URL);

    let response = match transport.client().get(CHECK_URL).send().await {
        Ok(response) => response,
        Err(e) => {
            log.line(&format!("[ERR ] ProxyCheck {CHECK_URL} -> {e}"));
            tracing::warn!("proxy check request failed: {}", e);
            return false;
        }
    };

    let status = response.status();
    let confirmed = match response.text().await {
        Ok(body) => body_confirms_anonymity(&body),
        Err(e) => {
            log.line(&format!("[ERR ] ProxyCheck {CHECK_URL} -> {e}"));
            tracing::warn!("proxy check body read failed: {}", e);
            return false;
        }
    };

    log.line(&format!(
        "[INFO] ProxyCheck {CHECK_URL} -> {status} (ok={confirmed})"
    ));
    tracing::info!("proxy check status: {} ok={}", status, confirmed);
    confirmed
}
