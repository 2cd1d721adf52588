//! Credence Registries: Institution registry, credential ledger and fraud
//! registry, plus the `TrustNetwork` that wires them together.
//!
//! Dependencies point one way only: fraud → ledger → institutions. Each
//! registry owns its records and counters behind a single lock and exposes
//! copies to everyone else.

pub mod directory;
pub mod fraud;
pub mod institutions;
pub mod ledger;
pub mod network;

pub use directory::{CredentialIndex, InstitutionDirectory};
pub use fraud::{FraudRegistry, FraudSnapshot};
pub use institutions::{InstitutionRegistry, InstitutionSnapshot};
pub use ledger::{CredentialLedger, IssueRequest, LedgerSnapshot};
pub use network::{NetworkSnapshot, TrustNetwork};
