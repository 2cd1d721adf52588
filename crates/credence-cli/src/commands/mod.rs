pub mod admin;
pub mod credential;
pub mod fraud;
pub mod init;
pub mod institution;

use clap::Args;
use serde::Serialize;

use credence_core::{Address, CallContext, Component, Height, TrustError};
use credence_registry::{NetworkSnapshot, TrustNetwork};
use credence_store::Storage;

use crate::config::CredenceConfig;

/// Caller identity and height shared by every mutating command.
#[derive(Args, Debug)]
pub struct TxArgs {
    /// Address submitting the operation.
    #[arg(long)]
    pub caller: Address,

    /// Current height of the host chain.
    #[arg(long, default_value_t = 0)]
    pub height: Height,
}

impl TxArgs {
    pub fn context(&self) -> CallContext {
        CallContext::new(self.caller.clone(), self.height)
    }
}

/// An opened store plus the network rebuilt from it.
pub struct Session {
    storage: Storage,
    network: TrustNetwork,
}

impl Session {
    /// Open the configured store, falling back to a genesis network when it is empty.
    pub fn open(config: &CredenceConfig) -> anyhow::Result<Self> {
        let storage = Storage::open(&config.storage.data_dir)?;
        let snapshot = match storage.load_snapshot()? {
            Some(snapshot) => snapshot,
            None => {
                let admin = Address::new(config.network.genesis_admin.as_str())?;
                tracing::info!(admin = %admin, "no network in store, starting from genesis");
                NetworkSnapshot::genesis(admin)
            }
        };
        Ok(Self {
            storage,
            network: TrustNetwork::from_snapshot(snapshot),
        })
    }

    pub fn network(&self) -> &TrustNetwork {
        &self.network
    }

    /// Persisted records, as of the last commit.
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Persist the current network state.
    pub fn commit(&self) -> anyhow::Result<()> {
        self.storage.save_snapshot(&self.network.snapshot())?;
        Ok(())
    }
}

/// Turn an operation rejected by `component` into a CLI error carrying its numeric code.
pub fn rejected(component: Component) -> impl Fn(TrustError) -> anyhow::Error {
    move |err| {
        let code = err.code(component);
        tracing::warn!(?component, code, error = %err, "operation rejected");
        anyhow::anyhow!("error {}: {}", code, err)
    }
}

/// Pretty-print a value as JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
