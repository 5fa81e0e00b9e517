// ABOUTME: Reconciler: create, read, update and delete of one container.
// ABOUTME: Owns readiness polling, grace-period removal and attach-and-wait.

mod attach;
mod create;
mod delete;
mod error;
mod read;
mod reconciler;
mod record;
mod update;
mod upload;

pub use error::{ReconcileError, ReconcileErrorKind};
pub use read::ReadOutcome;
pub use reconciler::Reconciler;
pub use record::{ContainerRecord, ObservedState};
pub use upload::{UPLOAD_ROOT, upload_archive};
