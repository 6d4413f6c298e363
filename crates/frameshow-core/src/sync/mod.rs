//! Server push events and their reconciliation into the album tree.

pub mod event;
pub mod reconciler;

pub use event::{EventBatch, ServerEvent};
pub use reconciler::{LoadingSignal, ReconcileOutcome, Reconciler};
