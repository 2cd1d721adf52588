//! Credential ledger commands.

use clap::Args;
use serde_json::json;

use credence_core::{Component, CredentialId, Height, InstitutionId};
use credence_registry::IssueRequest;

use super::{print_json, rejected, Session, TxArgs};

#[derive(Args, Debug)]
pub struct IssueArgs {
    #[command(flatten)]
    pub tx: TxArgs,

    /// Issuing institution.
    #[arg(long)]
    pub institution: InstitutionId,

    #[arg(long)]
    pub student: String,

    /// Credential type (e.g. "degree").
    #[arg(long = "type")]
    pub credential_type: String,

    #[arg(long)]
    pub name: String,

    /// Height after which the credential expires; omit for no expiry.
    #[arg(long)]
    pub expires: Option<Height>,

    #[arg(long, default_value = "")]
    pub metadata: String,
}

#[derive(Args, Debug)]
pub struct RevokeArgs {
    #[command(flatten)]
    pub tx: TxArgs,

    #[arg(long)]
    pub id: CredentialId,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[arg(long)]
    pub id: CredentialId,
}

#[derive(Args, Debug)]
pub struct ValidArgs {
    #[arg(long)]
    pub id: CredentialId,

    /// Height to evaluate validity at.
    #[arg(long)]
    pub height: Height,
}

/// Issue a credential on behalf of a verified institution.
pub fn issue(session: &Session, args: &IssueArgs) -> anyhow::Result<()> {
    let request = IssueRequest {
        institution_id: args.institution,
        student_id: args.student.clone(),
        credential_type: args.credential_type.clone(),
        credential_name: args.name.clone(),
        expiration_date: args.expires,
        metadata: args.metadata.clone(),
    };
    let id = session
        .network()
        .ledger()
        .issue_credential(&args.tx.context(), request)
        .map_err(rejected(Component::Credentials))?;
    session.commit()?;
    print_json(&json!({ "credential_id": id }))
}

/// Revoke a credential.
pub fn revoke(session: &Session, args: &RevokeArgs) -> anyhow::Result<()> {
    session
        .network()
        .ledger()
        .revoke_credential(&args.tx.context(), args.id)
        .map_err(rejected(Component::Credentials))?;
    session.commit()?;
    print_json(&json!({ "revoked": args.id }))
}

/// Print a stored credential.
pub fn show(session: &Session, args: &ShowArgs) -> anyhow::Result<()> {
    match session.storage().get_credential(args.id)? {
        Some(credential) => print_json(&credential),
        None => anyhow::bail!("credential {} not found", args.id),
    }
}

/// Print whether a credential is valid at the given height.
pub fn valid(session: &Session, args: &ValidArgs) -> anyhow::Result<()> {
    let ledger = session.network().ledger();
    print_json(&json!({
        "credential_id": args.id,
        "height": args.height,
        "valid": ledger.is_credential_valid(args.id, args.height),
        "status": ledger.credential_status(args.id, args.height).map(|s| s.to_string()),
    }))
}
