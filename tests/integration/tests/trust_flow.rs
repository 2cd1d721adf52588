//! Integration test: institution onboarding through credential validity.

use credence_core::{CredentialStatus, EntityRef, TrustError};
use credence_integration_tests::*;

#[test]
fn test_register_verify_issue_and_check() {
    let network = network_with_issuer(1);

    let institution = network.institutions().get_institution(1).expect("institution");
    assert_eq!(institution.name, "Harvard University");
    assert!(institution.verified);
    assert_eq!(institution.registration_date, NOW);
    assert!(network.institutions().is_institution_admin(1, &addr(DELEGATE)));

    let id = network
        .ledger()
        .issue_credential(&as_delegate(NOW), degree(1, Some(200)))
        .expect("issue");
    assert_eq!(id, 1);

    let credential = network.ledger().get_credential(id).expect("credential");
    assert_eq!(credential.student_id, STUDENT);
    assert_eq!(credential.issue_date, NOW);
    assert!(!credential.revoked);
    assert!(network.ledger().is_credential_valid(id, NOW));
}

#[test]
fn test_unverified_institution_cannot_issue() {
    let network = credence_registry::TrustNetwork::new(addr(ADMIN));
    let admin = as_admin(NOW);
    network
        .institutions()
        .register_institution(&admin, 7, "Unaccredited College", "USA", "https://example.edu")
        .unwrap();
    network
        .institutions()
        .add_institution_admin(&admin, 7, addr(DELEGATE))
        .unwrap();

    let result = network
        .ledger()
        .issue_credential(&as_delegate(NOW), degree(7, None));
    assert_eq!(result, Err(TrustError::InvalidInstitution(7)));
    assert_eq!(network.ledger().credential_count(), 0);

    network.institutions().verify_institution(&admin, 7).unwrap();
    let id = network
        .ledger()
        .issue_credential(&as_delegate(NOW), degree(7, None))
        .unwrap();
    assert_eq!(id, 1);
}

#[test]
fn test_ids_are_sequential_across_rejections() {
    let network = network_with_issuer(1);
    let outsider = credence_core::CallContext::new(addr("ST3OUTSIDER"), NOW);

    assert_eq!(
        network.ledger().issue_credential(&as_delegate(NOW), degree(1, None)),
        Ok(1)
    );
    assert!(matches!(
        network.ledger().issue_credential(&outsider, degree(1, None)),
        Err(TrustError::Unauthorized { .. })
    ));
    assert_eq!(
        network.ledger().issue_credential(&as_delegate(NOW), degree(1, None)),
        Ok(2)
    );
    assert_eq!(network.ledger().credential_count(), 2);
}

#[test]
fn test_validity_around_expiration() {
    let network = network_with_issuer(1);
    let id = network
        .ledger()
        .issue_credential(&as_delegate(NOW), degree(1, Some(200)))
        .unwrap();

    let ledger = network.ledger();
    assert!(ledger.is_credential_valid(id, 199));
    assert!(ledger.is_credential_valid(id, 200));
    assert!(!ledger.is_credential_valid(id, 201));
    assert_eq!(ledger.credential_status(id, 201), Some(CredentialStatus::Expired));
    assert!(!ledger.is_credential_valid(999, NOW));
    assert_eq!(ledger.credential_status(999, NOW), None);
}

#[test]
fn test_revocation_is_final() {
    let network = network_with_issuer(1);
    let id = network
        .ledger()
        .issue_credential(&as_delegate(NOW), degree(1, None))
        .unwrap();

    network.ledger().revoke_credential(&as_delegate(150), id).unwrap();
    assert!(!network.ledger().is_credential_valid(id, 150));
    assert_eq!(
        network.ledger().credential_status(id, 150),
        Some(CredentialStatus::Revoked)
    );
    assert_eq!(
        network.ledger().revoke_credential(&as_delegate(151), id),
        Err(TrustError::AlreadyRevoked(id))
    );
    assert_eq!(
        network.ledger().revoke_credential(&as_delegate(151), 42),
        Err(TrustError::NotFound(EntityRef::Credential(42)))
    );
}

#[test]
fn test_deactivated_delegate_loses_rights() {
    let network = network_with_issuer(1);
    let id = network
        .ledger()
        .issue_credential(&as_delegate(NOW), degree(1, None))
        .unwrap();

    network
        .institutions()
        .remove_institution_admin(&as_admin(130), 1, &addr(DELEGATE))
        .unwrap();
    let grant = network
        .institutions()
        .get_institution_admin(1, &addr(DELEGATE))
        .expect("grant kept");
    assert!(!grant.active);

    assert!(matches!(
        network.ledger().issue_credential(&as_delegate(131), degree(1, None)),
        Err(TrustError::Unauthorized { .. })
    ));
    assert!(matches!(
        network.ledger().revoke_credential(&as_delegate(131), id),
        Err(TrustError::Unauthorized { .. })
    ));

    network
        .institutions()
        .add_institution_admin(&as_admin(132), 1, addr(DELEGATE))
        .unwrap();
    assert!(network.ledger().revoke_credential(&as_delegate(133), id).is_ok());
}

#[test]
fn test_queries_by_student_and_institution() {
    let network = network_with_issuer(1);
    for _ in 0..3 {
        network
            .ledger()
            .issue_credential(&as_delegate(NOW), degree(1, None))
            .unwrap();
    }
    assert_eq!(network.ledger().credentials_for_student(STUDENT).len(), 3);
    assert!(network.ledger().credentials_for_student("ST1NOBODY").is_empty());
    assert_eq!(network.ledger().credentials_for_institution(1).len(), 3);
    assert!(network.ledger().credentials_for_institution(2).is_empty());
}
