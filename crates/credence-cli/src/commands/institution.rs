//! Institution registry commands.

use clap::Args;
use serde_json::json;

use credence_core::{Address, Component, InstitutionId};

use super::{print_json, rejected, Session, TxArgs};

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[command(flatten)]
    pub tx: TxArgs,

    /// Externally assigned institution id.
    #[arg(long)]
    pub id: InstitutionId,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub country: String,

    #[arg(long)]
    pub website: String,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub tx: TxArgs,

    #[arg(long)]
    pub id: InstitutionId,
}

#[derive(Args, Debug)]
pub struct GrantArgs {
    #[command(flatten)]
    pub tx: TxArgs,

    /// Institution the grant applies to.
    #[arg(long)]
    pub institution: InstitutionId,

    /// Delegate address.
    #[arg(long)]
    pub address: Address,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[arg(long)]
    pub id: InstitutionId,

    /// Also report whether this address holds an active grant.
    #[arg(long)]
    pub admin: Option<Address>,
}

/// Register an institution under the caller's admin key.
pub fn register(session: &Session, args: &RegisterArgs) -> anyhow::Result<()> {
    session
        .network()
        .institutions()
        .register_institution(
            &args.tx.context(),
            args.id,
            args.name.as_str(),
            args.country.as_str(),
            args.website.as_str(),
        )
        .map_err(rejected(Component::Institutions))?;
    session.commit()?;
    print_json(&json!({ "registered": args.id }))
}

/// Mark an institution verified.
pub fn verify(session: &Session, args: &VerifyArgs) -> anyhow::Result<()> {
    session
        .network()
        .institutions()
        .verify_institution(&args.tx.context(), args.id)
        .map_err(rejected(Component::Institutions))?;
    session.commit()?;
    print_json(&json!({ "verified": args.id }))
}

/// Grant an address admin rights on an institution.
pub fn add_admin(session: &Session, args: &GrantArgs) -> anyhow::Result<()> {
    session
        .network()
        .institutions()
        .add_institution_admin(&args.tx.context(), args.institution, args.address.clone())
        .map_err(rejected(Component::Institutions))?;
    session.commit()?;
    print_json(&json!({
        "institution_id": args.institution,
        "address": args.address,
        "active": true,
    }))
}

/// Deactivate an institution admin grant.
pub fn remove_admin(session: &Session, args: &GrantArgs) -> anyhow::Result<()> {
    session
        .network()
        .institutions()
        .remove_institution_admin(&args.tx.context(), args.institution, &args.address)
        .map_err(rejected(Component::Institutions))?;
    session.commit()?;
    print_json(&json!({
        "institution_id": args.institution,
        "address": args.address,
        "active": false,
    }))
}

/// Print a stored institution with its admin flag for the caller.
pub fn show(session: &Session, args: &ShowArgs) -> anyhow::Result<()> {
    let Some(institution) = session.storage().get_institution(args.id)? else {
        anyhow::bail!("institution {} not found", args.id);
    };
    let registry = session.network().institutions();
    match &args.admin {
        Some(address) => print_json(&json!({
            "institution": institution,
            "admin": address,
            "is_admin": registry.is_institution_admin(args.id, address),
        })),
        None => print_json(&institution),
    }
}
