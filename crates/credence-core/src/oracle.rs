//! Read-only capabilities one registry exposes to the layer above it.
//!
//! Dependencies only point downward: the fraud side asks the credential
//! side, the credential side asks the institution side. Nothing calls back
//! up, so implementations may be consulted while the caller holds its own
//! lock.

use crate::types::{Address, CredentialId, InstitutionId};

/// Answers institution verification and delegation questions.
pub trait InstitutionOracle: Send + Sync {
    /// Whether the institution exists and has been verified.
    fn is_institution_verified(&self, id: InstitutionId) -> bool;

    /// Whether `address` holds an active admin grant for the institution.
    fn is_institution_admin(&self, id: InstitutionId, address: &Address) -> bool;
}

/// Answers credential existence questions.
pub trait CredentialOracle: Send + Sync {
    /// Whether a credential with this id was ever issued.
    fn credential_exists(&self, id: CredentialId) -> bool;
}
