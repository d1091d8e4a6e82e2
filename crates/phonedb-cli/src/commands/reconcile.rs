use crate::commands::Context;
use anyhow::{Context as _, Result};
use phonedb_core::domain::PhoneId;
use phonedb_core::rules::ReconcileAction;
use phonedb_store::{ReconcileOptions, ReconcileOutcome};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileArgs {
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
pub struct ReconcileSummary {
    pub processed: usize,
    pub unchanged: usize,
    pub updated: usize,
    pub deleted: usize,
    pub dry_run: bool,
    pub outcomes: Vec<OutcomeDto>,
}

#[derive(Debug, Serialize)]
pub struct OutcomeDto {
    pub id: PhoneId,
    pub number: String,
    #[serde(flatten)]
    pub action: ReconcileAction,
}

impl From<ReconcileOutcome> for OutcomeDto {
    fn from(outcome: ReconcileOutcome) -> Self {
        Self {
            id: outcome.record.id,
            number: outcome.record.number,
            action: outcome.action,
        }
    }
}

pub fn reconcile(ctx: &Context<'_>, args: ReconcileArgs) -> Result<ReconcileSummary> {
    let report = ctx
        .store
        .reconcile(ReconcileOptions {
            dry_run: args.dry_run,
        })
        .with_context(|| "reconcile phone numbers")?;

    let summary = ReconcileSummary {
        processed: report.processed,
        unchanged: report.unchanged,
        updated: report.updated,
        deleted: report.deleted,
        dry_run: report.dry_run,
        outcomes: report.outcomes.into_iter().map(OutcomeDto::from).collect(),
    };

    for outcome in &summary.outcomes {
        debug!(
            id = %outcome.id,
            number = %outcome.number,
            action = outcome.action.label(),
            "phone reconciled"
        );
    }

    if ctx.json {
        return Ok(summary);
    }

    for outcome in &summary.outcomes {
        println!("Processing {} {:?}", outcome.id, outcome.number);
        match &outcome.action {
            ReconcileAction::Unchanged => println!("  no changes required"),
            ReconcileAction::Update { canonical } => println!("  updating to {}", canonical),
            ReconcileAction::Delete { canonical, kept } => {
                println!("  removing, {} already stored as {}", canonical, kept)
            }
        }
    }

    let suffix = if summary.dry_run { " (dry run)" } else { "" };
    println!(
        "{} processed: {} updated, {} removed, {} unchanged{}",
        summary.processed, summary.updated, summary.deleted, summary.unchanged, suffix
    );
    Ok(summary)
}
