//! Integration test: parallel issuance and reporting against one network.

use std::collections::BTreeSet;
use std::sync::Arc;

use credence_integration_tests::*;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_issuance_allocates_dense_ids() {
    let network = Arc::new(network_with_issuer(1));

    let mut handles = Vec::new();
    for _ in 0..64 {
        let network = Arc::clone(&network);
        handles.push(tokio::task::spawn_blocking(move || {
            network
                .ledger()
                .issue_credential(&as_delegate(NOW), degree(1, None))
        }));
    }

    let mut ids = BTreeSet::new();
    for handle in handles {
        let id = handle.await.expect("task").expect("issue");
        assert!(ids.insert(id), "duplicate id {id}");
    }
    assert_eq!(ids, (1..=64).collect::<BTreeSet<_>>());
    assert_eq!(network.ledger().credential_count(), 64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_reports_race_with_issuance() {
    let network = Arc::new(network_with_issuer(1));
    network
        .ledger()
        .issue_credential(&as_delegate(NOW), degree(1, None))
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..32 {
        let network = Arc::clone(&network);
        handles.push(tokio::task::spawn_blocking(move || {
            if i % 2 == 0 {
                network
                    .ledger()
                    .issue_credential(&as_delegate(NOW), degree(1, None))
                    .map(|_| ())
            } else {
                network
                    .fraud()
                    .report_fraud(&as_delegate(NOW), 1, "duplicate seal")
                    .map(|_| ())
            }
        }));
    }
    for handle in handles {
        handle.await.expect("task").expect("operation");
    }

    assert_eq!(network.ledger().credential_count(), 17);
    assert_eq!(network.fraud().report_count(), 16);
    let report_ids: BTreeSet<_> = network
        .fraud()
        .reports_for_credential(1)
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(report_ids, (1..=16).collect::<BTreeSet<_>>());
}
