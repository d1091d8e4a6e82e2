use crate::error::Result;
use crate::repo::PhonesRepo;
use phonedb_core::domain::PhoneRecord;
use phonedb_core::rules::{canonical_target, plan_reconcile, ReconcileAction};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Run the whole pass, then roll it back.
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub record: PhoneRecord,
    pub action: ReconcileAction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub processed: usize,
    pub unchanged: usize,
    pub updated: usize,
    pub deleted: usize,
    pub dry_run: bool,
    pub outcomes: Vec<ReconcileOutcome>,
}

/// One reconciliation pass over every stored number.
///
/// Records are listed up front and handled in id order. Each formatted number
/// is looked up by its canonical value: if another row already holds it the
/// formatted row is deleted, otherwise it is rewritten in place. Because the
/// lookups see earlier rewrites, two rows collapsing to the same value in one
/// pass keep the first and delete the second.
pub fn run(conn: &Connection, options: ReconcileOptions) -> Result<ReconcileReport> {
    let tx = conn.unchecked_transaction()?;
    let report = {
        let phones = PhonesRepo::new(&tx);
        let records = phones.list()?;
        let mut report = ReconcileReport {
            dry_run: options.dry_run,
            ..Default::default()
        };

        for record in records {
            let holder = match canonical_target(&record) {
                Some(canonical) => phones.find_by_number(&canonical)?,
                None => None,
            };
            let action = plan_reconcile(&record, holder.as_ref());
            match &action {
                ReconcileAction::Unchanged => report.unchanged += 1,
                ReconcileAction::Update { canonical } => {
                    phones.update(record.id, canonical)?;
                    report.updated += 1;
                }
                ReconcileAction::Delete { .. } => {
                    phones.delete(record.id)?;
                    report.deleted += 1;
                }
            }
            report.processed += 1;
            report.outcomes.push(ReconcileOutcome { record, action });
        }

        report
    };

    if options.dry_run {
        tx.rollback()?;
    } else {
        tx.commit()?;
    }
    Ok(report)
}
