//! onionsweep: scan onion-service targets through a SOCKS5 proxy.

use anyhow::{Context, Result};
use clap::Parser;
use onionsweep_core::{RunId, ScanConfig};
use onionsweep_scanner::{
    read_targets, report, run_scan_pool, verify_proxy, Capturer, Fetcher, HeadlessCapturer,
    HttpFetcher, ProxyTransport, RunLog, ScanPipeline,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// onionsweep, an onion-service reachability scanner.
///
/// Fetches every target through the configured SOCKS5 proxy, saves page
/// bodies, optionally captures proxied screenshots, and writes a JSON
/// result set plus a human-readable summary.
#[derive(Debug, Parser)]
#[command(name = "onionsweep", version, about, long_about = None)]
struct Cli {
    /// Path to the targets file (one URL per line, `- ` markers allowed)
    #[arg(long, default_value = "targets.yaml")]
    targets: PathBuf,

    /// Output directory
    #[arg(long)]
    out: Option<String>,

    /// SOCKS5 proxy address (Tor Browser usually 127.0.0.1:9150)
    #[arg(long)]
    proxy: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long = "timeout-secs")]
    timeout_secs: Option<u64>,

    /// Concurrent workers (1 for sequential)
    #[arg(long)]
    workers: Option<usize>,

    /// Skip the proxy verification request
    #[arg(long = "no-verify-proxy")]
    no_verify_proxy: bool,

    /// Skip screenshot capture entirely
    #[arg(long = "no-screenshots")]
    no_screenshots: bool,

    /// Screenshot navigation/render timeout in seconds
    #[arg(long = "screenshot-timeout-secs")]
    screenshot_timeout_secs: Option<u64>,

    /// Wait after page load before capturing, in milliseconds
    #[arg(long = "screenshot-wait-ms")]
    screenshot_wait_ms: Option<u64>,

    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

/// CLI flags win over the config file, which wins over defaults.
fn apply_cli_overrides(mut config: ScanConfig, cli: &Cli) -> ScanConfig {
    if let Some(out) = &cli.out {
        config.output.dir = out.clone();
    }
    if let Some(proxy) = &cli.proxy {
        config.proxy.addr = proxy.clone();
    }
    if let Some(timeout) = cli.timeout_secs {
        config.proxy.timeout_secs = timeout;
    }
    if let Some(workers) = cli.workers {
        config.scanning.workers = workers;
    }
    if cli.no_verify_proxy {
        config.proxy.verify = false;
    }
    if cli.no_screenshots {
        config.capture.enabled = false;
    }
    if let Some(timeout) = cli.screenshot_timeout_secs {
        config.capture.navigation_timeout_secs = timeout;
    }
    if let Some(wait) = cli.screenshot_wait_ms {
        config.capture.settle_delay_ms = wait;
    }
    config
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,onionsweep=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = ScanConfig::load_with_env(cli.config.as_deref()).context("load configuration")?;
    let config = apply_cli_overrides(config, &cli);

    let run_id = RunId::generate();
    info!("Starting onionsweep v{} run {}", env!("CARGO_PKG_VERSION"), run_id);

    // Setup phase: any failure below aborts before a worker starts.
    let out_dir = PathBuf::from(&config.output.dir);
    let html_dir = out_dir.join("html");
    let shot_dir = out_dir.join("screenshots");
    fs::create_dir_all(&html_dir)
        .with_context(|| format!("create output dir {}", html_dir.display()))?;
    if config.capture.enabled {
        fs::create_dir_all(&shot_dir)
            .with_context(|| format!("create screenshots dir {}", shot_dir.display()))?;
    }

    let log_path = out_dir.join("scan_report.log");
    let log = Arc::new(RunLog::open(&log_path).context("open run log")?);
    log.line(&format!("[INFO] run {run_id} started"));

    let targets = read_targets(&cli.targets)?;

    let transport = ProxyTransport::new(
        &config.proxy.addr,
        Duration::from_secs(config.proxy.timeout_secs),
        &config.scanning.user_agent,
    )?;

    if config.proxy.verify && !verify_proxy(&transport, &log).await {
        warn!("proxy verification failed; continuing (egress may not be anonymized)");
    }

    let workers = config.scanning.effective_workers();
    info!("Loaded {} targets", targets.len());
    info!(
        "Proxy: {} | Timeout: {}s | Workers: {} | Screenshots: {}",
        config.proxy.addr, config.proxy.timeout_secs, workers, config.capture.enabled
    );
    info!("Output: {}", out_dir.display());

    let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(transport.client().clone(), &html_dir));
    let capturer: Option<Arc<dyn Capturer>> = if config.capture.enabled {
        Some(Arc::new(HeadlessCapturer::new(
            &config.capture,
            transport.proxy_addr(),
            &config.scanning.user_agent,
        )))
    } else {
        None
    };

    let pipeline = Arc::new(ScanPipeline::new(fetcher, capturer, shot_dir, log.clone()));

    let started = Instant::now();
    let records = run_scan_pool(targets, workers, move |worker_id, target| {
        let pipeline = pipeline.clone();
        async move { pipeline.scan(worker_id, &target).await }
    })
    .await;

    // Reporting failures are warnings: the per-target work is already done.
    let json_path = out_dir.join("scan_results.json");
    if let Err(e) = report::write_json(&json_path, &records) {
        warn!("could not write JSON results: {}", e);
    }
    let summary_path = out_dir.join("scan_summary.log");
    if let Err(e) = report::write_summary(&summary_path, &records) {
        warn!("could not write summary: {}", e);
    }

    let reachable = records.iter().filter(|r| r.reachable).count();
    log.line(&format!(
        "[INFO] run {run_id} finished: {}/{} reachable",
        reachable,
        records.len()
    ));
    info!(
        "Scan finished in {:.1}s ({}/{} reachable)",
        started.elapsed().as_secs_f64(),
        reachable,
        records.len()
    );
    info!("Report: {}", log_path.display());
    info!("Summary: {}", summary_path.display());
    info!("JSON: {}", json_path.display());

    Ok(())
}
