use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use credence_core::{
    next_id, Address, AdminAuthority, CallContext, CredentialId, CredentialOracle, EntityRef,
    FraudReport, PatternId, ReportId, ReportStateMachine, ReportStatus, SuspiciousPattern,
    TrustError,
};

/// Serializable copy of everything the fraud registry owns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudSnapshot {
    pub reports: Vec<FraudReport>,
    pub patterns: Vec<SuspiciousPattern>,
    pub report_counter: ReportId,
    pub pattern_counter: PatternId,
}

#[derive(Default)]
struct FraudState {
    reports: BTreeMap<ReportId, FraudReport>,
    patterns: BTreeMap<PatternId, SuspiciousPattern>,
    report_counter: ReportId,
    pattern_counter: PatternId,
}

/// Fraud reports against credentials and the admin-curated list of
/// suspicious patterns.
pub struct FraudRegistry {
    authority: Arc<AdminAuthority>,
    credentials: Arc<dyn CredentialOracle>,
    state: RwLock<FraudState>,
}

impl FraudRegistry {
    /// Create an empty registry that checks credentials through `credentials`.
    pub fn new(authority: Arc<AdminAuthority>, credentials: Arc<dyn CredentialOracle>) -> Self {
        Self {
            authority,
            credentials,
            state: RwLock::new(FraudState::default()),
        }
    }

    /// Rebuild a registry from a snapshot. Counters never fall below the
    /// highest stored id.
    pub fn from_snapshot(
        authority: Arc<AdminAuthority>,
        credentials: Arc<dyn CredentialOracle>,
        snapshot: FraudSnapshot,
    ) -> Self {
        let reports: BTreeMap<ReportId, FraudReport> = snapshot
            .reports
            .into_iter()
            .map(|report| (report.id, report))
            .collect();
        let patterns: BTreeMap<PatternId, SuspiciousPattern> = snapshot
            .patterns
            .into_iter()
            .map(|pattern| (pattern.id, pattern))
            .collect();
        let highest_report = reports.keys().next_back().copied().unwrap_or(0);
        let highest_pattern = patterns.keys().next_back().copied().unwrap_or(0);
        Self {
            authority,
            credentials,
            state: RwLock::new(FraudState {
                reports,
                patterns,
                report_counter: snapshot.report_counter.max(highest_report),
                pattern_counter: snapshot.pattern_counter.max(highest_pattern),
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, FraudState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FraudState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// File a fraud report against an existing credential. Open to any caller.
    pub fn report_fraud(
        &self,
        ctx: &CallContext,
        credential_id: CredentialId,
        reason: impl Into<String>,
    ) -> Result<ReportId, TrustError> {
        let mut state = self.write();

        if !self.credentials.credential_exists(credential_id) {
            tracing::debug!(credential_id, "fraud report rejected: unknown credential");
            return Err(TrustError::NotFound(EntityRef::Credential(credential_id)));
        }

        let id = next_id(state.report_counter, "fraud report")?;
        let report = FraudReport {
            id,
            reporter: ctx.caller.clone(),
            credential_id,
            reason: reason.into(),
            report_date: ctx.height,
            status: ReportStatus::Pending,
            processed_by: None,
            processed_date: None,
        };
        tracing::info!(
            report_id = id,
            credential_id,
            reporter = %ctx.caller,
            "fraud report filed"
        );
        state.reports.insert(id, report);
        state.report_counter = id;
        Ok(id)
    }

    /// Move a pending report to its final status. Admin only, once per report.
    pub fn process_fraud_report(
        &self,
        ctx: &CallContext,
        id: ReportId,
        new_status: ReportStatus,
    ) -> Result<(), TrustError> {
        let _admin = self.authority.authorize(&ctx.caller)?;

        let mut state = self.write();
        let report = state
            .reports
            .get_mut(&id)
            .ok_or(TrustError::NotFound(EntityRef::FraudReport(id)))?;

        let next = ReportStateMachine::process(id, &report.status, new_status)?;
        tracing::info!(
            report_id = id,
            credential_id = report.credential_id,
            status = %next,
            "fraud report processed"
        );
        report.status = next;
        report.processed_by = Some(ctx.caller.clone());
        report.processed_date = Some(ctx.height);
        Ok(())
    }

    /// Record a new suspicious pattern. Admin only.
    pub fn add_suspicious_pattern(
        &self,
        ctx: &CallContext,
        pattern_type: impl Into<String>,
        description: impl Into<String>,
        severity: u32,
    ) -> Result<PatternId, TrustError> {
        let _admin = self.authority.authorize(&ctx.caller)?;

        let mut state = self.write();
        let id = next_id(state.pattern_counter, "suspicious pattern")?;
        let pattern = SuspiciousPattern {
            id,
            pattern_type: pattern_type.into(),
            description: description.into(),
            severity,
            created_by: ctx.caller.clone(),
            creation_date: ctx.height,
        };
        tracing::info!(
            pattern_id = id,
            pattern_type = %pattern.pattern_type,
            severity,
            "suspicious pattern added"
        );
        state.patterns.insert(id, pattern);
        state.pattern_counter = id;
        Ok(id)
    }

    /// Copy of a fraud report, if filed.
    pub fn get_fraud_report(&self, id: ReportId) -> Option<FraudReport> {
        self.read().reports.get(&id).cloned()
    }

    /// Copy of a suspicious pattern, if recorded.
    pub fn get_suspicious_pattern(&self, id: PatternId) -> Option<SuspiciousPattern> {
        self.read().patterns.get(&id).cloned()
    }

    /// Reports filed against a credential, ordered by report id.
    pub fn reports_for_credential(&self, credential_id: CredentialId) -> Vec<FraudReport> {
        self.read()
            .reports
            .values()
            .filter(|report| report.credential_id == credential_id)
            .cloned()
            .collect()
    }

    /// Reports still awaiting review, oldest first.
    pub fn pending_reports(&self) -> Vec<FraudReport> {
        self.read()
            .reports
            .values()
            .filter(|report| report.is_pending())
            .cloned()
            .collect()
    }

    /// Number of reports filed so far.
    pub fn report_count(&self) -> u64 {
        self.read().report_counter
    }

    /// Number of patterns recorded so far.
    pub fn pattern_count(&self) -> u64 {
        self.read().pattern_counter
    }

    /// Hand the process admin role to `new_admin`. Admin only.
    pub fn transfer_admin(&self, ctx: &CallContext, new_admin: Address) -> Result<(), TrustError> {
        self.authority.transfer(ctx, new_admin)
    }

    /// Copy out reports, patterns and both counters.
    pub fn snapshot(&self) -> FraudSnapshot {
        let state = self.read();
        FraudSnapshot {
            reports: state.reports.values().cloned().collect(),
            patterns: state.patterns.values().cloned().collect(),
            report_counter: state.report_counter,
            pattern_counter: state.pattern_counter,
        }
    }
}
