pub mod reconcile;

pub use reconcile::{canonical_target, plan_reconcile, ReconcileAction};
