//! RocksDB storage backend for Credence network state.

use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, IteratorMode, Options, WriteBatch, DB};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use credence_core::{
    Address, Credential, FraudReport, Institution, InstitutionAdminGrant, InstitutionId,
    SuspiciousPattern,
};
use credence_registry::{
    FraudSnapshot, InstitutionSnapshot, LedgerSnapshot, NetworkSnapshot,
};

use crate::error::StoreError;

/// Column family names, one per record partition plus scalar state.
pub const CF_INSTITUTIONS: &str = "institutions";
pub const CF_INSTITUTION_ADMINS: &str = "institution_admins";
pub const CF_CREDENTIALS: &str = "credentials";
pub const CF_FRAUD_REPORTS: &str = "fraud_reports";
pub const CF_SUSPICIOUS_PATTERNS: &str = "suspicious_patterns";
pub const CF_STATE: &str = "state";

const COLUMN_FAMILIES: [&str; 6] = [
    CF_INSTITUTIONS,
    CF_INSTITUTION_ADMINS,
    CF_CREDENTIALS,
    CF_FRAUD_REPORTS,
    CF_SUSPICIOUS_PATTERNS,
    CF_STATE,
];

/// Keys in the `state` column family.
const KEY_ADMIN: &str = "admin";
const KEY_CREDENTIAL_COUNTER: &str = "credential_counter";
const KEY_REPORT_COUNTER: &str = "report_counter";
const KEY_PATTERN_COUNTER: &str = "pattern_counter";

/// Big-endian key for an id so iteration follows id order.
pub fn id_key(id: u64) -> [u8; 8] {
    id.to_be_bytes()
}

/// Key of an admin grant: the big-endian institution id followed by the address.
pub fn grant_key(institution_id: InstitutionId, address: &Address) -> Vec<u8> {
    let mut key = id_key(institution_id).to_vec();
    key.extend_from_slice(address.as_str().as_bytes());
    key
}

/// RocksDB-backed storage for a trust network.
pub struct Storage {
    db: DB,
}

impl Storage {
    /// Open or create a RocksDB database at the given path with column families.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(path)?;

        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors = COLUMN_FAMILIES
            .iter()
            .map(|name| ColumnFamilyDescriptor::new(*name, Options::default()))
            .collect::<Vec<_>>();

        let db = DB::open_cf_descriptors(&opts, path, cf_descriptors)?;
        tracing::debug!(path = %path.display(), "storage opened");

        Ok(Self { db })
    }

    fn cf(&self, name: &'static str) -> Result<&ColumnFamily, StoreError> {
        self.db
            .cf_handle(name)
            .ok_or(StoreError::MissingColumnFamily(name))
    }

    fn get(&self, cf_name: &'static str, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.db.get_cf(self.cf(cf_name)?, key)?)
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        cf_name: &'static str,
        key: &[u8],
    ) -> Result<Option<T>, StoreError> {
        match self.get(cf_name, key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn scan<T: DeserializeOwned>(&self, cf_name: &'static str) -> Result<Vec<T>, StoreError> {
        let cf = self.cf(cf_name)?;
        let mut out = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            out.push(serde_json::from_slice(&value)?);
        }
        Ok(out)
    }

    fn get_counter(&self, key: &'static str) -> Result<u64, StoreError> {
        match self.get(CF_STATE, key.as_bytes())? {
            Some(bytes) => {
                let raw: [u8; 8] = bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| StoreError::Corrupt(key.to_string()))?;
                Ok(u64::from_be_bytes(raw))
            }
            None => Ok(0),
        }
    }

    /// Get a single institution record.
    pub fn get_institution(&self, id: InstitutionId) -> Result<Option<Institution>, StoreError> {
        self.get_json(CF_INSTITUTIONS, &id_key(id))
    }

    /// Get a single credential record.
    pub fn get_credential(&self, id: u64) -> Result<Option<Credential>, StoreError> {
        self.get_json(CF_CREDENTIALS, &id_key(id))
    }

    /// Get a single fraud report.
    pub fn get_fraud_report(&self, id: u64) -> Result<Option<FraudReport>, StoreError> {
        self.get_json(CF_FRAUD_REPORTS, &id_key(id))
    }

    /// Persist a full network snapshot in one atomic write.
    ///
    /// Records are never deleted by the registries, so overwriting every key
    /// present in the snapshot brings the store in line with it.
    pub fn save_snapshot(&self, snapshot: &NetworkSnapshot) -> Result<(), StoreError> {
        let mut batch = WriteBatch::default();

        put_all(
            &mut batch,
            self.cf(CF_INSTITUTIONS)?,
            snapshot
                .institutions
                .institutions
                .iter()
                .map(|inst| (id_key(inst.id).to_vec(), inst)),
        )?;
        put_all(
            &mut batch,
            self.cf(CF_INSTITUTION_ADMINS)?,
            snapshot
                .institutions
                .admins
                .iter()
                .map(|grant| (grant_key(grant.institution_id, &grant.address), grant)),
        )?;
        put_all(
            &mut batch,
            self.cf(CF_CREDENTIALS)?,
            snapshot
                .ledger
                .credentials
                .iter()
                .map(|cred| (id_key(cred.id).to_vec(), cred)),
        )?;
        put_all(
            &mut batch,
            self.cf(CF_FRAUD_REPORTS)?,
            snapshot
                .fraud
                .reports
                .iter()
                .map(|report| (id_key(report.id).to_vec(), report)),
        )?;
        put_all(
            &mut batch,
            self.cf(CF_SUSPICIOUS_PATTERNS)?,
            snapshot
                .fraud
                .patterns
                .iter()
                .map(|pattern| (id_key(pattern.id).to_vec(), pattern)),
        )?;

        let state = self.cf(CF_STATE)?;
        batch.put_cf(state, KEY_ADMIN, serde_json::to_vec(&snapshot.admin)?);
        batch.put_cf(
            state,
            KEY_CREDENTIAL_COUNTER,
            snapshot.ledger.credential_counter.to_be_bytes(),
        );
        batch.put_cf(
            state,
            KEY_REPORT_COUNTER,
            snapshot.fraud.report_counter.to_be_bytes(),
        );
        batch.put_cf(
            state,
            KEY_PATTERN_COUNTER,
            snapshot.fraud.pattern_counter.to_be_bytes(),
        );

        self.db.write(batch)?;
        tracing::info!(
            institutions = snapshot.institutions.institutions.len(),
            credentials = snapshot.ledger.credentials.len(),
            reports = snapshot.fraud.reports.len(),
            "network snapshot saved"
        );
        Ok(())
    }

    /// Load the persisted network, or `None` if nothing was saved yet.
    pub fn load_snapshot(&self) -> Result<Option<NetworkSnapshot>, StoreError> {
        let Some(admin) = self.get_json::<Address>(CF_STATE, KEY_ADMIN.as_bytes())? else {
            return Ok(None);
        };

        let institutions: Vec<Institution> = self.scan(CF_INSTITUTIONS)?;
        let admins: Vec<InstitutionAdminGrant> = self.scan(CF_INSTITUTION_ADMINS)?;
        let credentials: Vec<Credential> = self.scan(CF_CREDENTIALS)?;
        let reports: Vec<FraudReport> = self.scan(CF_FRAUD_REPORTS)?;
        let patterns: Vec<SuspiciousPattern> = self.scan(CF_SUSPICIOUS_PATTERNS)?;

        let snapshot = NetworkSnapshot {
            admin,
            institutions: InstitutionSnapshot {
                institutions,
                admins,
            },
            ledger: LedgerSnapshot {
                credentials,
                credential_counter: self.get_counter(KEY_CREDENTIAL_COUNTER)?,
            },
            fraud: FraudSnapshot {
                reports,
                patterns,
                report_counter: self.get_counter(KEY_REPORT_COUNTER)?,
                pattern_counter: self.get_counter(KEY_PATTERN_COUNTER)?,
            },
        };
        tracing::debug!(admin = %snapshot.admin, "network snapshot loaded");
        Ok(Some(snapshot))
    }
}

fn put_all<'a, T, I>(batch: &mut WriteBatch, cf: &ColumnFamily, records: I) -> Result<(), StoreError>
where
    T: Serialize + 'a,
    I: Iterator<Item = (Vec<u8>, &'a T)>,
{
    for (key, record) in records {
        batch.put_cf(cf, key, serde_json::to_vec(record)?);
    }
    Ok(())
}
