//! `credence transfer-admin`: Hand the network admin role to a new address.

use clap::Args;
use serde_json::json;

use credence_core::{Address, Component};

use super::{print_json, rejected, Session, TxArgs};

#[derive(Args, Debug)]
pub struct TransferArgs {
    #[command(flatten)]
    pub tx: TxArgs,

    /// Address that becomes the admin.
    #[arg(long)]
    pub new_admin: Address,
}

/// Hand the network admin role to a new address.
pub fn run(session: &Session, args: &TransferArgs) -> anyhow::Result<()> {
    let network = session.network();
    network
        .institutions()
        .transfer_admin(&args.tx.context(), args.new_admin.clone())
        .map_err(rejected(Component::Institutions))?;
    session.commit()?;
    print_json(&json!({ "admin": network.admin() }))
}
