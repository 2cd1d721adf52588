//! Wiring of the three registries around one admin authority.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use credence_core::{Address, AdminAuthority};

use crate::fraud::{FraudRegistry, FraudSnapshot};
use crate::institutions::{InstitutionRegistry, InstitutionSnapshot};
use crate::ledger::{CredentialLedger, LedgerSnapshot};

/// Serializable state of a whole network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub admin: Address,
    pub institutions: InstitutionSnapshot,
    pub ledger: LedgerSnapshot,
    pub fraud: FraudSnapshot,
}

impl NetworkSnapshot {
    /// State of a freshly created network.
    pub fn genesis(admin: Address) -> Self {
        Self {
            admin,
            institutions: InstitutionSnapshot::default(),
            ledger: LedgerSnapshot::default(),
            fraud: FraudSnapshot::default(),
        }
    }
}

/// The institution registry, credential ledger and fraud registry, wired
/// so that fraud checks go to the ledger and the ledger asks the registry.
pub struct TrustNetwork {
    authority: Arc<AdminAuthority>,
    institutions: Arc<InstitutionRegistry>,
    ledger: Arc<CredentialLedger>,
    fraud: Arc<FraudRegistry>,
}

impl TrustNetwork {
    /// Create an empty network administered by `admin`.
    pub fn new(admin: Address) -> Self {
        Self::from_snapshot(NetworkSnapshot::genesis(admin))
    }

    /// Rebuild a network from a snapshot.
    pub fn from_snapshot(snapshot: NetworkSnapshot) -> Self {
        let authority = Arc::new(AdminAuthority::new(snapshot.admin));
        let institutions = Arc::new(InstitutionRegistry::from_snapshot(
            authority.clone(),
            snapshot.institutions,
        ));
        let ledger = Arc::new(CredentialLedger::from_snapshot(
            authority.clone(),
            institutions.clone(),
            snapshot.ledger,
        ));
        let fraud = Arc::new(FraudRegistry::from_snapshot(
            authority.clone(),
            ledger.clone(),
            snapshot.fraud,
        ));

        tracing::debug!(
            admin = %authority.current(),
            institutions = institutions.institution_count(),
            credentials = ledger.credential_count(),
            reports = fraud.report_count(),
            "trust network assembled"
        );

        Self {
            authority,
            institutions,
            ledger,
            fraud,
        }
    }

    pub fn institutions(&self) -> &Arc<InstitutionRegistry> {
        &self.institutions
    }

    pub fn ledger(&self) -> &Arc<CredentialLedger> {
        &self.ledger
    }

    pub fn fraud(&self) -> &Arc<FraudRegistry> {
        &self.fraud
    }

    /// Current process admin.
    pub fn admin(&self) -> Address {
        self.authority.current()
    }

    /// Copy out the full state.
    ///
    /// Each registry is copied under its own lock; take snapshots between
    /// operations for a cross-registry consistent view.
    pub fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            admin: self.authority.current(),
            institutions: self.institutions.snapshot(),
            ledger: self.ledger.snapshot(),
            fraud: self.fraud.snapshot(),
        }
    }
}
