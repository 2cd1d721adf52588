use std::fmt;

use crate::lifecycle::ReportStatus;
use crate::types::{Address, CredentialId, InstitutionId, PatternId, ReportId};

/// Reference to a stored entity, carried by [`TrustError::NotFound`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRef {
    Institution(InstitutionId),
    AdminGrant(InstitutionId, Address),
    Credential(CredentialId),
    FraudReport(ReportId),
    SuspiciousPattern(PatternId),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Institution(id) => write!(f, "institution {}", id),
            Self::AdminGrant(id, address) => {
                write!(f, "admin grant ({}, {})", id, address)
            }
            Self::Credential(id) => write!(f, "credential {}", id),
            Self::FraudReport(id) => write!(f, "fraud report {}", id),
            Self::SuspiciousPattern(id) => write!(f, "suspicious pattern {}", id),
        }
    }
}

/// Errors shared by every registry.
///
/// Each rejected precondition maps to exactly one variant, and no state is
/// mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrustError {
    #[error("unauthorized caller: {caller}")]
    Unauthorized { caller: Address },

    #[error("not found: {0}")]
    NotFound(EntityRef),

    #[error("institution {0} is already registered")]
    AlreadyRegistered(InstitutionId),

    #[error("credential {0} is already revoked")]
    AlreadyRevoked(CredentialId),

    #[error("fraud report {id} was already processed as {status}")]
    AlreadyProcessed { id: ReportId, status: ReportStatus },

    #[error("institution {0} is not verified")]
    InvalidInstitution(InstitutionId),

    #[error("invalid report status: {0:?}")]
    InvalidStatus(String),

    #[error("no {0} ids left to allocate")]
    CounterExhausted(&'static str),
}

/// Component that rejected an operation.
///
/// Numeric codes are scoped per component: `NotFound` is 3 for institutions
/// and credentials but 2 for the fraud registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Institutions,
    Credentials,
    Fraud,
}

impl TrustError {
    /// Numeric code of this error as reported by `component`.
    ///
    /// | Error | Institutions | Credentials | Fraud |
    /// |---|---|---|---|
    /// | `Unauthorized` | 1 | 1 | 1 |
    /// | `AlreadyRegistered` | 2 | | |
    /// | `InvalidInstitution` | | 2 | |
    /// | `NotFound` | 3 | 3 | 2 |
    /// | `AlreadyRevoked` | | 4 | |
    /// | `AlreadyProcessed` | | | 3 |
    /// | `InvalidStatus` | | | 4 |
    /// | `CounterExhausted` | | 5 | 5 |
    pub fn code(&self, component: Component) -> u32 {
        match self {
            Self::Unauthorized { .. } => 1,
            Self::AlreadyRegistered(_) | Self::InvalidInstitution(_) => 2,
            Self::NotFound(_) => match component {
                Component::Fraud => 2,
                Component::Institutions | Component::Credentials => 3,
            },
            Self::AlreadyProcessed { .. } => 3,
            Self::AlreadyRevoked(_) | Self::InvalidStatus(_) => 4,
            Self::CounterExhausted(_) => 5,
        }
    }

    /// `Unauthorized` for `caller`.
    pub fn unauthorized(caller: &Address) -> Self {
        Self::Unauthorized {
            caller: caller.clone(),
        }
    }
}
