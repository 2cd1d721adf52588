//! Fixtures shared by the cross-crate scenarios in `tests/`.

use std::path::PathBuf;

use credence_core::{Address, CallContext, Height, InstitutionId};
use credence_registry::{IssueRequest, TrustNetwork};

pub const ADMIN: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";
pub const DELEGATE: &str = "ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG";
pub const STUDENT: &str = "ST1STUDENT1234567890ABCDEF";

/// Height the scenarios treat as "now".
pub const NOW: Height = 123;

pub fn addr(s: &str) -> Address {
    Address::new(s).expect("fixture address is valid")
}

pub fn as_admin(height: Height) -> CallContext {
    CallContext::new(addr(ADMIN), height)
}

pub fn as_delegate(height: Height) -> CallContext {
    CallContext::new(addr(DELEGATE), height)
}

/// A network with one verified institution that `DELEGATE` may issue for.
pub fn network_with_issuer(institution_id: InstitutionId) -> TrustNetwork {
    let network = TrustNetwork::new(addr(ADMIN));
    let admin = as_admin(NOW);
    let registry = network.institutions();
    registry
        .register_institution(
            &admin,
            institution_id,
            "Harvard University",
            "USA",
            "https://harvard.edu",
        )
        .expect("register");
    registry
        .verify_institution(&admin, institution_id)
        .expect("verify");
    registry
        .add_institution_admin(&admin, institution_id, addr(DELEGATE))
        .expect("grant");
    network
}

pub fn degree(institution_id: InstitutionId, expiration_date: Option<Height>) -> IssueRequest {
    IssueRequest {
        institution_id,
        student_id: STUDENT.into(),
        credential_type: "degree".into(),
        credential_name: "Bachelor of Computer Science".into(),
        expiration_date,
        metadata: r#"{"gpa":"3.8"}"#.into(),
    }
}

/// Fresh directory for a throwaway store.
pub fn temp_dir(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{prefix}-{}", rand::random::<u64>()))
}
