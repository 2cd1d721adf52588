//! Credence Store: Persists a `TrustNetwork` snapshot to RocksDB, one
//! column family per record partition plus a `state` family for the admin
//! and the id counters.

pub mod error;
pub mod storage;

pub use error::StoreError;
pub use storage::Storage;
