use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use credence_core::{
    next_id, Address, AdminAuthority, CallContext, Credential, CredentialId, CredentialOracle,
    CredentialStatus, EntityRef, Height, InstitutionId, InstitutionOracle, TrustError,
};

/// Parameters of a credential issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRequest {
    pub institution_id: InstitutionId,
    pub student_id: String,
    pub credential_type: String,
    pub credential_name: String,
    /// `None` issues a credential that never expires.
    pub expiration_date: Option<Height>,
    pub metadata: String,
}

/// Serializable copy of everything the ledger owns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub credentials: Vec<Credential>,
    /// Last allocated credential id (0 when nothing was issued).
    pub credential_counter: CredentialId,
}

#[derive(Default)]
struct LedgerState {
    credentials: BTreeMap<CredentialId, Credential>,
    counter: CredentialId,
}

/// Ledger of issued credentials.
///
/// Authorizes issuance and revocation through an [`InstitutionOracle`]; the
/// oracle is consulted while the ledger's write lock is held so the checks
/// and the id allocation happen as one step.
pub struct CredentialLedger {
    authority: Arc<AdminAuthority>,
    institutions: Arc<dyn InstitutionOracle>,
    state: RwLock<LedgerState>,
}

impl CredentialLedger {
    /// Create an empty ledger that authorizes issuers through `institutions`.
    pub fn new(authority: Arc<AdminAuthority>, institutions: Arc<dyn InstitutionOracle>) -> Self {
        Self {
            authority,
            institutions,
            state: RwLock::new(LedgerState::default()),
        }
    }

    /// Rebuild a ledger from a snapshot.
    ///
    /// The counter is never allowed to fall below the highest stored id, so
    /// ids are not reused even if the snapshot carried a stale counter.
    pub fn from_snapshot(
        authority: Arc<AdminAuthority>,
        institutions: Arc<dyn InstitutionOracle>,
        snapshot: LedgerSnapshot,
    ) -> Self {
        let credentials: BTreeMap<CredentialId, Credential> = snapshot
            .credentials
            .into_iter()
            .map(|cred| (cred.id, cred))
            .collect();
        let highest = credentials.keys().next_back().copied().unwrap_or(0);
        Self {
            authority,
            institutions,
            state: RwLock::new(LedgerState {
                credentials,
                counter: snapshot.credential_counter.max(highest),
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issue a credential on behalf of a verified institution.
    ///
    /// The caller must hold an active admin grant for the institution.
    /// Returns the newly allocated id; a rejected call allocates nothing.
    pub fn issue_credential(
        &self,
        ctx: &CallContext,
        request: IssueRequest,
    ) -> Result<CredentialId, TrustError> {
        let mut state = self.write();

        if !self.institutions.is_institution_verified(request.institution_id) {
            tracing::debug!(
                institution_id = request.institution_id,
                "issuance rejected: institution not verified"
            );
            return Err(TrustError::InvalidInstitution(request.institution_id));
        }
        if !self
            .institutions
            .is_institution_admin(request.institution_id, &ctx.caller)
        {
            tracing::debug!(
                institution_id = request.institution_id,
                caller = %ctx.caller,
                "issuance rejected: caller is not an institution admin"
            );
            return Err(TrustError::unauthorized(&ctx.caller));
        }

        let id = next_id(state.counter, "credential")?;
        let credential = Credential {
            id,
            institution_id: request.institution_id,
            student_id: request.student_id,
            credential_type: request.credential_type,
            credential_name: request.credential_name,
            issue_date: ctx.height,
            expiration_date: request.expiration_date,
            metadata: request.metadata,
            revoked: false,
        };

        tracing::info!(
            credential_id = id,
            institution_id = credential.institution_id,
            student_id = %credential.student_id,
            credential_type = %credential.credential_type,
            expires = ?credential.expiration_date,
            "credential issued"
        );

        state.credentials.insert(id, credential);
        state.counter = id;
        Ok(id)
    }

    /// Revoke a credential. Only an active admin of the issuing institution
    /// may revoke, and only once.
    pub fn revoke_credential(&self, ctx: &CallContext, id: CredentialId) -> Result<(), TrustError> {
        let mut state = self.write();

        let credential = state
            .credentials
            .get_mut(&id)
            .ok_or(TrustError::NotFound(EntityRef::Credential(id)))?;
        if !self
            .institutions
            .is_institution_admin(credential.institution_id, &ctx.caller)
        {
            tracing::debug!(credential_id = id, caller = %ctx.caller, "revocation rejected");
            return Err(TrustError::unauthorized(&ctx.caller));
        }
        if credential.revoked {
            return Err(TrustError::AlreadyRevoked(id));
        }

        credential.revoked = true;
        tracing::info!(
            credential_id = id,
            institution_id = credential.institution_id,
            height = ctx.height,
            "credential revoked"
        );
        Ok(())
    }

    /// Copy of a credential record, if issued.
    pub fn get_credential(&self, id: CredentialId) -> Option<Credential> {
        self.read().credentials.get(&id).cloned()
    }

    /// Whether the credential exists, is not revoked and has not expired at
    /// `height`. Always recomputed from the stored record.
    pub fn is_credential_valid(&self, id: CredentialId, height: Height) -> bool {
        self.read()
            .credentials
            .get(&id)
            .is_some_and(|cred| cred.is_valid_at(height))
    }

    /// Derived status at `height`, or `None` for an unknown id.
    pub fn credential_status(&self, id: CredentialId, height: Height) -> Option<CredentialStatus> {
        self.read()
            .credentials
            .get(&id)
            .map(|cred| cred.status_at(height))
    }

    /// Every credential held by `student_id`, ordered by id.
    pub fn credentials_for_student(&self, student_id: &str) -> Vec<Credential> {
        self.read()
            .credentials
            .values()
            .filter(|cred| cred.student_id == student_id)
            .cloned()
            .collect()
    }

    /// Every credential issued by an institution, ordered by id.
    pub fn credentials_for_institution(&self, institution_id: InstitutionId) -> Vec<Credential> {
        self.read()
            .credentials
            .values()
            .filter(|cred| cred.institution_id == institution_id)
            .cloned()
            .collect()
    }

    /// Number of credentials issued so far.
    pub fn credential_count(&self) -> u64 {
        self.read().counter
    }

    /// Hand the process admin role to `new_admin`. Admin only.
    pub fn transfer_admin(&self, ctx: &CallContext, new_admin: Address) -> Result<(), TrustError> {
        self.authority.transfer(ctx, new_admin)
    }

    /// Copy out every credential and the id counter.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let state = self.read();
        LedgerSnapshot {
            credentials: state.credentials.values().cloned().collect(),
            credential_counter: state.counter,
        }
    }
}

impl CredentialOracle for CredentialLedger {
    fn credential_exists(&self, id: CredentialId) -> bool {
        self.read().credentials.contains_key(&id)
    }
}
