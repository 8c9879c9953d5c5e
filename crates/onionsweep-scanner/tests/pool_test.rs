use onionsweep_core::ScanRecord;
use onionsweep_scanner::run_scan_pool;
use std::collections::HashSet;
use std::time::Duration;

fn synthetic_targets(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("target-{i:02}.onion")).collect()
}

/// Synthetic pipeline: uneven per-target latency to force interleaving.
async fn synthetic_scan(_worker_id: usize, target: String) -> ScanRecord {
    let jitter = target.as_bytes().iter().map(|b| u64::from(*b)).sum::<u64>() % 3;
    tokio::time::sleep(Duration::from_millis(jitter)).await;
    ScanRecord::unreachable(
        target.clone(),
        format!("http://{target}"),
        None,
        "synthetic",
        jitter,
    )
}

#[tokio::test]
async fn test_exactly_one_record_per_target() {
    let targets = synthetic_targets(50);

    for workers in 1..=10 {
        let records = run_scan_pool(targets.clone(), workers, synthetic_scan).await;

        assert_eq!(records.len(), 50, "workers={workers}: record count");
        let originals: HashSet<&str> = records.iter().map(|r| r.original.as_str()).collect();
        assert_eq!(originals.len(), 50, "workers={workers}: no duplication");
    }
}

#[tokio::test]
async fn test_same_record_set_regardless_of_worker_count() {
    let targets = synthetic_targets(50);

    let serial = run_scan_pool(targets.clone(), 1, synthetic_scan).await;
    let parallel = run_scan_pool(targets, 10, synthetic_scan).await;

    let serial_set: HashSet<String> = serial.iter().map(|r| r.original.clone()).collect();
    let parallel_set: HashSet<String> = parallel.iter().map(|r| r.original.clone()).collect();
    assert_eq!(serial_set, parallel_set);
}

#[tokio::test]
async fn test_worker_count_clamped_to_one() {
    let targets = synthetic_targets(5);
    let records = run_scan_pool(targets, 0, synthetic_scan).await;
    assert_eq!(records.len(), 5);
}

#[tokio::test]
async fn test_duplicates_scanned_independently() {
    let targets = vec!["dup.onion".to_string(), "dup.onion".to_string()];
    let records = run_scan_pool(targets, 4, synthetic_scan).await;
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.original == "dup.onion"));
}
