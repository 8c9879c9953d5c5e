//! Fixed-size worker pool with a bounded job queue and join barrier.
//!
//! One dispatcher feeds the job channel, `N` workers race on it, one
//! collector drains the result channel. The job channel's capacity of one
//! makes the dispatcher block until a worker is free, so in-flight work is
//! bounded by the pool size. Results arrive in completion order; nothing
//! about the input ordering is preserved.

use onionsweep_core::ScanRecord;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

/// Run every target through `scan` on a pool of `workers` executors and
/// collect exactly one record per target.
///
/// Worker counts below 1 are clamped to 1. The call returns only after
/// every worker has exited and every record has been drained: the
/// collector observes the result channel closing, which happens once the
/// last worker drops its sender.
pub async fn run_scan_pool<S, F>(targets: Vec<String>, workers: usize, scan: S) -> Vec<ScanRecord>
where
    S: Fn(usize, String) -> F + Send + Sync + 'static,
    F: Future<Output = ScanRecord> + Send + 'static,
{
    let workers = workers.max(1);
    let expected = targets.len();

    let (job_tx, job_rx) = mpsc::channel::<String>(1);
    let job_rx = Arc::new(Mutex::new(job_rx));
    let (result_tx, mut result_rx) = mpsc::channel::<ScanRecord>(workers);
    let scan = Arc::new(scan);

    let mut pool = JoinSet::new();
    for worker_id in 1..=workers {
        let job_rx = job_rx.clone();
        let result_tx = result_tx.clone();
        let scan = scan.clone();

        pool.spawn(async move {
            loop {
                let job = { job_rx.lock().await.recv().await };
                let Some(target) = job else {
                    break;
                };
                let record = scan(worker_id, target).await;
                if result_tx.send(record).await.is_err() {
                    break;
                }
            }
        });
    }
    // Workers hold the only remaining senders; the channel closes when the
    // last one exits.
    drop(result_tx);

    let dispatcher = tokio::spawn(async move {
        for target in targets {
            if job_tx.send(target).await.is_err() {
                break;
            }
        }
    });

    let mut records = Vec::with_capacity(expected);
    while let Some(record) = result_rx.recv().await {
        records.push(record);
    }

    while pool.join_next().await.is_some() {}
    let _ = dispatcher.await;

    records
}
