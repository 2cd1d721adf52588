//! Credence Core: Identifiers, records, error taxonomy, lifecycles and the
//! oracle traits shared by the Credence registries.

pub mod admin;
pub mod error;
pub mod lifecycle;
pub mod oracle;
pub mod records;
pub mod types;

pub use admin::AdminAuthority;
pub use error::{Component, EntityRef, TrustError};
pub use lifecycle::{CredentialStatus, ReportStateMachine, ReportStatus};
pub use oracle::{CredentialOracle, InstitutionOracle};
pub use records::{Credential, FraudReport, Institution, InstitutionAdminGrant, SuspiciousPattern};
pub use types::{
    next_id, Address, CallContext, CredentialId, Height, InstitutionId, InvalidAddress, PatternId,
    ReportId,
};
