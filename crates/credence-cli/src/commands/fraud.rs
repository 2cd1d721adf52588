//! Fraud registry commands.

use clap::Args;
use serde_json::json;

use credence_core::{Component, CredentialId, PatternId, ReportId, ReportStatus};

use super::{print_json, rejected, Session, TxArgs};

#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub tx: TxArgs,

    /// Credential being reported.
    #[arg(long)]
    pub credential: CredentialId,

    #[arg(long)]
    pub reason: String,
}

#[derive(Args, Debug)]
pub struct ProcessArgs {
    #[command(flatten)]
    pub tx: TxArgs,

    #[arg(long)]
    pub id: ReportId,

    /// Final status label (e.g. "confirmed", "rejected").
    #[arg(long)]
    pub status: String,
}

#[derive(Args, Debug)]
pub struct PatternArgs {
    #[command(flatten)]
    pub tx: TxArgs,

    #[arg(long = "type")]
    pub pattern_type: String,

    #[arg(long)]
    pub description: String,

    #[arg(long)]
    pub severity: u32,
}

#[derive(Args, Debug)]
pub struct ShowReportArgs {
    #[arg(long)]
    pub id: ReportId,
}

#[derive(Args, Debug)]
pub struct ShowPatternArgs {
    #[arg(long)]
    pub id: PatternId,
}

/// File a fraud report against a credential.
pub fn report(session: &Session, args: &ReportArgs) -> anyhow::Result<()> {
    let id = session
        .network()
        .fraud()
        .report_fraud(&args.tx.context(), args.credential, args.reason.as_str())
        .map_err(rejected(Component::Fraud))?;
    session.commit()?;
    print_json(&json!({ "report_id": id }))
}

/// Resolve a pending fraud report.
pub fn process(session: &Session, args: &ProcessArgs) -> anyhow::Result<()> {
    let status = ReportStatus::from_label(&args.status);
    session
        .network()
        .fraud()
        .process_fraud_report(&args.tx.context(), args.id, status.clone())
        .map_err(rejected(Component::Fraud))?;
    session.commit()?;
    print_json(&json!({ "report_id": args.id, "status": status }))
}

/// Record a suspicious pattern for a credential.
pub fn add_pattern(session: &Session, args: &PatternArgs) -> anyhow::Result<()> {
    let id = session
        .network()
        .fraud()
        .add_suspicious_pattern(
            &args.tx.context(),
            args.pattern_type.as_str(),
            args.description.as_str(),
            args.severity,
        )
        .map_err(rejected(Component::Fraud))?;
    session.commit()?;
    print_json(&json!({ "pattern_id": id }))
}

/// Print a stored fraud report.
pub fn show_report(session: &Session, args: &ShowReportArgs) -> anyhow::Result<()> {
    match session.storage().get_fraud_report(args.id)? {
        Some(report) => print_json(&report),
        None => anyhow::bail!("fraud report {} not found", args.id),
    }
}

/// Print a suspicious pattern.
pub fn show_pattern(session: &Session, args: &ShowPatternArgs) -> anyhow::Result<()> {
    match session.network().fraud().get_suspicious_pattern(args.id) {
        Some(pattern) => print_json(&pattern),
        None => anyhow::bail!("suspicious pattern {} not found", args.id),
    }
}
