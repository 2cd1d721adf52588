use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::TrustError;
use crate::types::{Height, ReportId};

/// Derived status of a credential at a given height.
///
/// Only `revoked` is stored; `Expired` is an overlay computed from the
/// expiration height every time it is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CredentialStatus {
    /// Not revoked and not past its expiration height.
    Active,
    /// Revoked by an admin of the issuing institution. Final state.
    Revoked,
    /// Expiration height is strictly below the queried height.
    Expired,
}

impl CredentialStatus {
    /// Derive the status from the stored fields and the current height.
    ///
    /// Revocation wins over expiry. A credential whose expiration equals the
    /// current height is still active.
    pub fn derive(revoked: bool, expiration_date: Option<Height>, height: Height) -> Self {
        if revoked {
            return Self::Revoked;
        }
        match expiration_date {
            Some(expiration) if expiration < height => Self::Expired,
            _ => Self::Active,
        }
    }

    /// Whether a credential in this status counts as valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Active)
    }

}

impl fmt::Display for CredentialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Revoked => write!(f, "revoked"),
            Self::Expired => write!(f, "expired"),
        }
    }
}

/// Review status of a fraud report.
///
/// Admins may pick any label when processing a report. The common outcomes
/// get their own variants; everything else is kept verbatim in `Other`.
/// Serialized as the plain label string.
///
/// Equality and hashing go by label, so `Other("confirmed")` and `Confirmed`
/// are the same status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReportStatus {
    Pending,
    Confirmed,
    Rejected,
    Other(String),
}

impl ReportStatus {
    pub const PENDING: &'static str = "pending";
    pub const CONFIRMED: &'static str = "confirmed";
    pub const REJECTED: &'static str = "rejected";

    /// Map a label to a status. Labels are taken as-is (case-sensitive).
    pub fn from_label(label: &str) -> Self {
        match label {
            Self::PENDING => Self::Pending,
            Self::CONFIRMED => Self::Confirmed,
            Self::REJECTED => Self::Rejected,
            other => Self::Other(other.to_string()),
        }
    }

    /// The label this status serializes as.
    pub fn label(&self) -> &str {
        match self {
            Self::Pending => Self::PENDING,
            Self::Confirmed => Self::CONFIRMED,
            Self::Rejected => Self::REJECTED,
            Self::Other(label) => label,
        }
    }

    /// Same status with a known label mapped to its named variant.
    pub fn canonical(self) -> Self {
        match self {
            Self::Other(label) => Self::from_label(&label),
            known => known,
        }
    }

    /// Whether the report still awaits review.
    pub fn is_pending(&self) -> bool {
        self.label() == Self::PENDING
    }
}

impl PartialEq for ReportStatus {
    fn eq(&self, other: &Self) -> bool {
        self.label() == other.label()
    }
}

impl Eq for ReportStatus {}

impl Hash for ReportStatus {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label().hash(state);
    }
}

impl From<String> for ReportStatus {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<ReportStatus> for String {
    fn from(status: ReportStatus) -> Self {
        match status {
            ReportStatus::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Enforces the single `pending -> <label>` edge of a fraud report.
pub struct ReportStateMachine;

impl ReportStateMachine {
    /// Compute the status a report moves to when processed.
    ///
    /// Fails with `AlreadyProcessed` unless the report is pending, and with
    /// `InvalidStatus` when the requested label is empty or `pending`. The
    /// returned status is canonical.
    pub fn process(
        id: ReportId,
        current: &ReportStatus,
        requested: ReportStatus,
    ) -> Result<ReportStatus, TrustError> {
        if !current.is_pending() {
            return Err(TrustError::AlreadyProcessed {
                id,
                status: current.clone(),
            });
        }
        if requested.is_pending() || requested.label().is_empty() {
            return Err(TrustError::InvalidStatus(requested.label().to_string()));
        }

        tracing::debug!(
            report_id = id,
            from = %current,
            to = %requested,
            "fraud report state transition"
        );

        Ok(requested.canonical())
    }
}
