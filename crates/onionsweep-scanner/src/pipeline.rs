//! Per-target scan pipeline: normalize, fetch, then capture on success.
//!
//! Every invocation yields exactly one [`ScanRecord`]; stage failures are
//! folded into the record, never propagated. Each stage is attempted at
//! most once, and capture only runs after a successful fetch with
//! screenshots enabled.

use crate::capture::Capturer;
use crate::fetch::Fetcher;
use crate::normalize::normalize_url;
use crate::runlog::RunLog;
use crate::storage;
use onionsweep_core::ScanRecord;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Immutable pipeline handles, shared across workers.
pub struct ScanPipeline {
    fetcher: Arc<dyn Fetcher>,
    capturer: Option<Arc<dyn Capturer>>,
    screenshot_dir: PathBuf,
    log: Arc<RunLog>,
}

impl ScanPipeline {
    /// Assemble a pipeline. A `None` capturer disables the capture stage
    /// entirely (it is skipped, not recorded as failed).
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        capturer: Option<Arc<dyn Capturer>>,
        screenshot_dir: PathBuf,
        log: Arc<RunLog>,
    ) -> Self {
        Self {
            fetcher,
            capturer,
            screenshot_dir,
            log,
        }
    }

    /// Run one target through fetch and optional capture.
    pub async fn scan(&self, worker_id: usize, raw_target: &str) -> ScanRecord {
        let started = Instant::now();
        let normalized = normalize_url(raw_target);

        let fetched = self.fetcher.fetch(&normalized).await;
        let duration_millis = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let fetched = match fetched {
            Ok(fetched) => fetched,
            Err(e) => {
                let msg = format!("[W{worker_id:02}][ERR ] {normalized} -> {e}");
                tracing::warn!("{}", msg);
                self.log.line(&msg);
                return ScanRecord::unreachable(
                    raw_target,
                    normalized,
                    e.http_status(),
                    e.to_string(),
                    duration_millis,
                );
            }
        };

        let msg = format!(
            "[W{worker_id:02}][OK  ] {normalized} -> {} saved={} ({duration_millis}ms)",
            fetched.status,
            fetched.saved_body_path.display(),
        );
        tracing::info!("{}", msg);
        self.log.line(&msg);

        let record = ScanRecord::reachable(
            raw_target,
            &normalized,
            fetched.status,
            fetched.saved_body_path,
            duration_millis,
        );

        let Some(capturer) = &self.capturer else {
            return record;
        };

        let dest = self
            .screenshot_dir
            .join(storage::screenshot_file_name(&normalized));
        match capturer.capture(&normalized, &dest).await {
            Ok(()) => {
                let msg = format!(
                    "[W{worker_id:02}][OK  ] Screenshot saved: {}",
                    dest.display()
                );
                tracing::info!("{}", msg);
                self.log.line(&msg);
                record.with_screenshot(dest)
            }
            Err(e) => {
                let msg = format!("[W{worker_id:02}][WARN] Screenshot failed: {normalized} -> {e}");
                tracing::warn!("{}", msg);
                self.log.line(&msg);
                record.with_screenshot_error(e.to_string())
            }
        }
    }
}
