//! Integration test: fraud reporting and admin review against the ledger.

use credence_core::{CallContext, EntityRef, ReportStatus, TrustError};
use credence_integration_tests::*;

const REASON: &str = "Suspicious credential - institution claims no record of this student";

#[test]
fn test_report_and_confirm() {
    let network = network_with_issuer(1);
    let credential_id = network
        .ledger()
        .issue_credential(&as_delegate(NOW), degree(1, Some(200)))
        .unwrap();

    let reporter = CallContext::new(addr(STUDENT), 140);
    let report_id = network
        .fraud()
        .report_fraud(&reporter, credential_id, REASON)
        .expect("report");
    assert_eq!(report_id, 1);

    let report = network.fraud().get_fraud_report(report_id).unwrap();
    assert_eq!(report.reporter, addr(STUDENT));
    assert_eq!(report.reason, REASON);
    assert_eq!(report.report_date, 140);
    assert!(report.is_pending());
    assert_eq!(network.fraud().pending_reports().len(), 1);

    network
        .fraud()
        .process_fraud_report(&as_admin(150), report_id, ReportStatus::Confirmed)
        .expect("process");
    let report = network.fraud().get_fraud_report(report_id).unwrap();
    assert_eq!(report.status, ReportStatus::Confirmed);
    assert_eq!(report.processed_by, Some(addr(ADMIN)));
    assert_eq!(report.processed_date, Some(150));
    assert!(network.fraud().pending_reports().is_empty());

    // Confirming fraud does not revoke the credential by itself.
    assert!(network.ledger().is_credential_valid(credential_id, 150));
}

#[test]
fn test_report_unknown_credential_rejected() {
    let network = network_with_issuer(1);
    let result = network
        .fraud()
        .report_fraud(&as_delegate(NOW), 5, REASON);
    assert_eq!(result, Err(TrustError::NotFound(EntityRef::Credential(5))));
    assert_eq!(network.fraud().report_count(), 0);
}

#[test]
fn test_report_is_processed_once() {
    let network = network_with_issuer(1);
    let credential_id = network
        .ledger()
        .issue_credential(&as_delegate(NOW), degree(1, None))
        .unwrap();
    let report_id = network
        .fraud()
        .report_fraud(&as_delegate(NOW), credential_id, REASON)
        .unwrap();

    network
        .fraud()
        .process_fraud_report(&as_admin(130), report_id, ReportStatus::Rejected)
        .unwrap();
    let second = network
        .fraud()
        .process_fraud_report(&as_admin(131), report_id, ReportStatus::Confirmed);
    assert!(matches!(second, Err(TrustError::AlreadyProcessed { .. })));
    assert_eq!(
        network.fraud().get_fraud_report(report_id).unwrap().status,
        ReportStatus::Rejected
    );
}

#[test]
fn test_only_admin_processes_reports() {
    let network = network_with_issuer(1);
    let credential_id = network
        .ledger()
        .issue_credential(&as_delegate(NOW), degree(1, None))
        .unwrap();
    let report_id = network
        .fraud()
        .report_fraud(&as_delegate(NOW), credential_id, REASON)
        .unwrap();

    let result = network
        .fraud()
        .process_fraud_report(&as_delegate(130), report_id, ReportStatus::Confirmed);
    assert!(matches!(result, Err(TrustError::Unauthorized { .. })));
    assert!(network.fraud().get_fraud_report(report_id).unwrap().is_pending());
}

#[test]
fn test_reports_for_credential_and_patterns() {
    let network = network_with_issuer(1);
    let first = network
        .ledger()
        .issue_credential(&as_delegate(NOW), degree(1, None))
        .unwrap();
    let second = network
        .ledger()
        .issue_credential(&as_delegate(NOW), degree(1, None))
        .unwrap();
    for credential_id in [first, first, second] {
        network
            .fraud()
            .report_fraud(&as_delegate(NOW), credential_id, REASON)
            .unwrap();
    }
    assert_eq!(network.fraud().reports_for_credential(first).len(), 2);
    assert_eq!(network.fraud().reports_for_credential(second).len(), 1);

    let pattern_id = network
        .fraud()
        .add_suspicious_pattern(
            &as_admin(NOW),
            "multiple-degrees",
            "Multiple degrees issued in short timeframe",
            3,
        )
        .unwrap();
    let pattern = network.fraud().get_suspicious_pattern(pattern_id).unwrap();
    assert_eq!(pattern.severity, 3);
    assert_eq!(pattern.created_by, addr(ADMIN));
    assert!(matches!(
        network
            .fraud()
            .add_suspicious_pattern(&as_delegate(NOW), "x", "y", 1),
        Err(TrustError::Unauthorized { .. })
    ));
    assert_eq!(network.fraud().pattern_count(), 1);
}
