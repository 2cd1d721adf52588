//! Stored records owned by the three registries.
//!
//! Registries hand these out by value; a caller holding a copy can never
//! reach back into the owning registry's state.

use serde::{Deserialize, Serialize};

use crate::lifecycle::{CredentialStatus, ReportStatus};
use crate::types::{Address, CredentialId, Height, InstitutionId, PatternId, ReportId};

/// An issuing institution (university, academy, certification body).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    pub id: InstitutionId,
    pub name: String,
    pub country: String,
    pub website: String,
    /// Flipped to true once by the admin; never reset.
    pub verified: bool,
    pub registration_date: Height,
}

/// Right for `address` to issue and revoke on behalf of `institution_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstitutionAdminGrant {
    pub institution_id: InstitutionId,
    pub address: Address,
    pub active: bool,
}

/// A credential issued to a holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub id: CredentialId,
    pub institution_id: InstitutionId,
    /// Opaque holder identifier.
    pub student_id: String,
    pub credential_type: String,
    pub credential_name: String,
    pub issue_date: Height,
    /// `None` means the credential never expires.
    pub expiration_date: Option<Height>,
    pub metadata: String,
    pub revoked: bool,
}

impl Credential {
    /// Status of this credential at `height`.
    pub fn status_at(&self, height: Height) -> CredentialStatus {
        CredentialStatus::derive(self.revoked, self.expiration_date, height)
    }

    pub fn is_valid_at(&self, height: Height) -> bool {
        self.status_at(height).is_valid()
    }
}

/// A third-party report flagging a credential as fraudulent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudReport {
    pub id: ReportId,
    pub reporter: Address,
    pub credential_id: CredentialId,
    pub reason: String,
    pub report_date: Height,
    pub status: ReportStatus,
    /// Admin that processed the report; `None` while pending.
    #[serde(default)]
    pub processed_by: Option<Address>,
    #[serde(default)]
    pub processed_date: Option<Height>,
}

impl FraudReport {
    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }
}

/// An admin-defined fraud heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspiciousPattern {
    pub id: PatternId,
    pub pattern_type: String,
    pub description: String,
    pub severity: u32,
    pub created_by: Address,
    pub creation_date: Height,
}
