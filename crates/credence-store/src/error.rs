/// Storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rocksdb::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("column family '{0}' not found")]
    MissingColumnFamily(&'static str),

    #[error("corrupt value for key '{0}'")]
    Corrupt(String),
}
