use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use credence_core::{
    Address, AdminAuthority, CallContext, EntityRef, Institution, InstitutionAdminGrant,
    InstitutionId, InstitutionOracle, TrustError,
};

/// Serializable copy of everything the institution registry owns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstitutionSnapshot {
    pub institutions: Vec<Institution>,
    pub admins: Vec<InstitutionAdminGrant>,
}

#[derive(Default)]
struct InstitutionState {
    institutions: BTreeMap<InstitutionId, Institution>,
    admins: BTreeMap<(InstitutionId, Address), InstitutionAdminGrant>,
}

/// Registry of issuing institutions and their delegated admins.
///
/// Leaf component: it depends on nothing but the shared admin authority.
pub struct InstitutionRegistry {
    authority: Arc<AdminAuthority>,
    state: RwLock<InstitutionState>,
}

impl InstitutionRegistry {
    /// Create an empty registry gated by `authority`.
    pub fn new(authority: Arc<AdminAuthority>) -> Self {
        Self {
            authority,
            state: RwLock::new(InstitutionState::default()),
        }
    }

    /// Rebuild a registry from a snapshot.
    pub fn from_snapshot(authority: Arc<AdminAuthority>, snapshot: InstitutionSnapshot) -> Self {
        let institutions = snapshot
            .institutions
            .into_iter()
            .map(|inst| (inst.id, inst))
            .collect();
        let admins = snapshot
            .admins
            .into_iter()
            .map(|grant| ((grant.institution_id, grant.address.clone()), grant))
            .collect();
        Self {
            authority,
            state: RwLock::new(InstitutionState {
                institutions,
                admins,
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, InstitutionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, InstitutionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new, unverified institution. Admin only.
    pub fn register_institution(
        &self,
        ctx: &CallContext,
        id: InstitutionId,
        name: impl Into<String>,
        country: impl Into<String>,
        website: impl Into<String>,
    ) -> Result<(), TrustError> {
        let _admin = self.authority.authorize(&ctx.caller)?;

        let mut state = self.write();
        if state.institutions.contains_key(&id) {
            tracing::debug!(institution_id = id, "institution already registered");
            return Err(TrustError::AlreadyRegistered(id));
        }

        let institution = Institution {
            id,
            name: name.into(),
            country: country.into(),
            website: website.into(),
            verified: false,
            registration_date: ctx.height,
        };
        tracing::info!(
            institution_id = id,
            name = %institution.name,
            height = ctx.height,
            "institution registered"
        );
        state.institutions.insert(id, institution);
        Ok(())
    }

    /// Mark an institution as verified. Admin only; idempotent.
    pub fn verify_institution(&self, ctx: &CallContext, id: InstitutionId) -> Result<(), TrustError> {
        let _admin = self.authority.authorize(&ctx.caller)?;

        let mut state = self.write();
        let institution = state
            .institutions
            .get_mut(&id)
            .ok_or(TrustError::NotFound(EntityRef::Institution(id)))?;
        institution.verified = true;
        tracing::info!(institution_id = id, "institution verified");
        Ok(())
    }

    /// Grant (or re-activate) admin rights for `address` on an institution.
    pub fn add_institution_admin(
        &self,
        ctx: &CallContext,
        id: InstitutionId,
        address: Address,
    ) -> Result<(), TrustError> {
        let _admin = self.authority.authorize(&ctx.caller)?;

        let mut state = self.write();
        if !state.institutions.contains_key(&id) {
            return Err(TrustError::NotFound(EntityRef::Institution(id)));
        }
        tracing::info!(institution_id = id, address = %address, "institution admin granted");
        state.admins.insert(
            (id, address.clone()),
            InstitutionAdminGrant {
                institution_id: id,
                address,
                active: true,
            },
        );
        Ok(())
    }

    /// Deactivate an existing grant. The record is kept with `active = false`.
    pub fn remove_institution_admin(
        &self,
        ctx: &CallContext,
        id: InstitutionId,
        address: &Address,
    ) -> Result<(), TrustError> {
        let _admin = self.authority.authorize(&ctx.caller)?;

        let mut state = self.write();
        if !state.institutions.contains_key(&id) {
            return Err(TrustError::NotFound(EntityRef::Institution(id)));
        }
        let grant = state
            .admins
            .get_mut(&(id, address.clone()))
            .ok_or_else(|| TrustError::NotFound(EntityRef::AdminGrant(id, address.clone())))?;
        grant.active = false;
        tracing::info!(institution_id = id, address = %address, "institution admin deactivated");
        Ok(())
    }

    /// Whether `address` holds an active admin grant for the institution.
    pub fn is_institution_admin(&self, id: InstitutionId, address: &Address) -> bool {
        self.read()
            .admins
            .get(&(id, address.clone()))
            .is_some_and(|grant| grant.active)
    }

    /// Whether the institution exists and has been verified.
    pub fn is_institution_verified(&self, id: InstitutionId) -> bool {
        self.read()
            .institutions
            .get(&id)
            .is_some_and(|inst| inst.verified)
    }

    /// Copy of an institution record, if registered.
    pub fn get_institution(&self, id: InstitutionId) -> Option<Institution> {
        self.read().institutions.get(&id).cloned()
    }

    /// Grant record for `address`, active or not.
    pub fn get_institution_admin(
        &self,
        id: InstitutionId,
        address: &Address,
    ) -> Option<InstitutionAdminGrant> {
        self.read().admins.get(&(id, address.clone())).cloned()
    }

    /// All institutions, ordered by id.
    pub fn institutions(&self) -> Vec<Institution> {
        self.read().institutions.values().cloned().collect()
    }

    /// Number of registered institutions.
    pub fn institution_count(&self) -> usize {
        self.read().institutions.len()
    }

    /// Hand the process admin role to `new_admin`. Admin only.
    pub fn transfer_admin(&self, ctx: &CallContext, new_admin: Address) -> Result<(), TrustError> {
        self.authority.transfer(ctx, new_admin)
    }

    /// Copy out institutions and grants, both ordered by key.
    pub fn snapshot(&self) -> InstitutionSnapshot {
        let state = self.read();
        InstitutionSnapshot {
            institutions: state.institutions.values().cloned().collect(),
            admins: state.admins.values().cloned().collect(),
        }
    }
}

impl InstitutionOracle for InstitutionRegistry {
    fn is_institution_verified(&self, id: InstitutionId) -> bool {
        InstitutionRegistry::is_institution_verified(self, id)
    }

    fn is_institution_admin(&self, id: InstitutionId, address: &Address) -> bool {
        InstitutionRegistry::is_institution_admin(self, id, address)
    }
}
