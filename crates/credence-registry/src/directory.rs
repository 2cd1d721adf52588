//! Admin-maintained oracle implementations.
//!
//! Used when a ledger or fraud registry runs without its lower layer in the
//! same process: the admin mirrors the facts the component needs instead of
//! the component reading them from a co-located registry.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, PoisonError, RwLock};

use credence_core::{
    Address, AdminAuthority, CallContext, CredentialId, CredentialOracle, InstitutionId,
    InstitutionOracle, TrustError,
};

#[derive(Default)]
struct DirectoryState {
    verified: BTreeMap<InstitutionId, bool>,
    admins: BTreeMap<(InstitutionId, Address), bool>,
}

/// Mirror of institution verification and admin grants.
pub struct InstitutionDirectory {
    authority: Arc<AdminAuthority>,
    state: RwLock<DirectoryState>,
}

impl InstitutionDirectory {
    pub fn new(authority: Arc<AdminAuthority>) -> Self {
        Self {
            authority,
            state: RwLock::new(DirectoryState::default()),
        }
    }

    /// Record whether an institution is verified. Admin only.
    pub fn set_institution_verified(
        &self,
        ctx: &CallContext,
        id: InstitutionId,
        verified: bool,
    ) -> Result<(), TrustError> {
        let _admin = self.authority.authorize(&ctx.caller)?;
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .verified
            .insert(id, verified);
        tracing::debug!(institution_id = id, verified, "directory verification updated");
        Ok(())
    }

    /// Record whether `address` is an active admin of an institution. Admin only.
    pub fn set_institution_admin(
        &self,
        ctx: &CallContext,
        id: InstitutionId,
        address: Address,
        active: bool,
    ) -> Result<(), TrustError> {
        let _admin = self.authority.authorize(&ctx.caller)?;
        tracing::debug!(institution_id = id, address = %address, active, "directory grant updated");
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .admins
            .insert((id, address), active);
        Ok(())
    }
}

impl InstitutionOracle for InstitutionDirectory {
    fn is_institution_verified(&self, id: InstitutionId) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .verified
            .get(&id)
            .copied()
            .unwrap_or(false)
    }

    fn is_institution_admin(&self, id: InstitutionId, address: &Address) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .admins
            .get(&(id, address.clone()))
            .copied()
            .unwrap_or(false)
    }
}

/// Set of credential ids known to exist.
pub struct CredentialIndex {
    authority: Arc<AdminAuthority>,
    known: RwLock<BTreeSet<CredentialId>>,
}

impl CredentialIndex {
    pub fn new(authority: Arc<AdminAuthority>) -> Self {
        Self {
            authority,
            known: RwLock::new(BTreeSet::new()),
        }
    }

    /// Mark a credential id as existing. Admin only; registering twice is a no-op.
    pub fn register_credential(&self, ctx: &CallContext, id: CredentialId) -> Result<(), TrustError> {
        let _admin = self.authority.authorize(&ctx.caller)?;
        self.known
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id);
        tracing::debug!(credential_id = id, "credential registered in index");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.known.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CredentialOracle for CredentialIndex {
    fn credential_exists(&self, id: CredentialId) -> bool {
        self.known
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&id)
    }
}
