use crate::domain::{normalize_phone, PhoneId, PhoneRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum ReconcileAction {
    Unchanged,
    Update { canonical: String },
    Delete { canonical: String, kept: PhoneId },
}

impl ReconcileAction {
    pub const fn label(&self) -> &'static str {
        match self {
            ReconcileAction::Unchanged => "unchanged",
            ReconcileAction::Update { .. } => "update",
            ReconcileAction::Delete { .. } => "delete",
        }
    }
}

/// Canonical value the record should move to, or `None` when it already holds it.
pub fn canonical_target(record: &PhoneRecord) -> Option<String> {
    let canonical = normalize_phone(&record.number);
    if canonical == record.number {
        None
    } else {
        Some(canonical)
    }
}

/// Decides what happens to `record`.
///
/// `holder` is whatever the store returned when looked up by the record's
/// canonical value. An existing holder wins and the record is deleted; a
/// holder that turns out to be the record itself counts as no holder.
pub fn plan_reconcile(record: &PhoneRecord, holder: Option<&PhoneRecord>) -> ReconcileAction {
    let Some(canonical) = canonical_target(record) else {
        return ReconcileAction::Unchanged;
    };

    match holder {
        Some(existing) if existing.id != record.id => ReconcileAction::Delete {
            canonical,
            kept: existing.id,
        },
        _ => ReconcileAction::Update { canonical },
    }
}
