//! Integration test: a network survives a round trip through RocksDB.

use credence_core::ReportStatus;
use credence_integration_tests::*;
use credence_registry::TrustNetwork;
use credence_store::Storage;

#[test]
fn test_network_restored_from_store() {
    let dir = temp_dir("credence-it");
    let network = network_with_issuer(1);
    let credential_id = network
        .ledger()
        .issue_credential(&as_delegate(NOW), degree(1, Some(200)))
        .unwrap();
    let report_id = network
        .fraud()
        .report_fraud(&as_delegate(NOW), credential_id, "forged seal")
        .unwrap();
    network
        .fraud()
        .process_fraud_report(&as_admin(130), report_id, ReportStatus::Other("escalated".into()))
        .unwrap();

    {
        let storage = Storage::open(&dir).unwrap();
        storage.save_snapshot(&network.snapshot()).unwrap();
    }

    let storage = Storage::open(&dir).unwrap();
    let snapshot = storage.load_snapshot().unwrap().expect("snapshot");
    assert_eq!(snapshot, network.snapshot());

    let restored = TrustNetwork::from_snapshot(snapshot);
    assert_eq!(restored.admin(), addr(ADMIN));
    assert!(restored.ledger().is_credential_valid(credential_id, 200));
    assert_eq!(
        restored.fraud().get_fraud_report(report_id).unwrap().status,
        ReportStatus::Other("escalated".into())
    );

    // Counters continue where the saved network stopped.
    let next = restored
        .ledger()
        .issue_credential(&as_delegate(140), degree(1, None))
        .unwrap();
    assert_eq!(next, credential_id + 1);

    let json = serde_json::to_value(restored.ledger().get_credential(next).unwrap()).unwrap();
    assert_eq!(json["issue_date"], 140);

    drop(storage);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_empty_store_has_no_network() {
    let dir = temp_dir("credence-it");
    let storage = Storage::open(&dir).unwrap();
    assert!(storage.load_snapshot().unwrap().is_none());
    drop(storage);
    std::fs::remove_dir_all(&dir).ok();
}
