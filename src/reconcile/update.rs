// ABOUTME: Update: accept lifecycle-flag changes in place, refuse everything else.
// ABOUTME: No runtime call is made.

use super::error::{ImmutableChangeSnafu, ReconcileError};
use super::reconciler::Reconciler;
use super::record::ContainerRecord;
use crate::config::DesiredContainer;
use crate::diff::{force_new_changes, lifecycle_changes};
use crate::runtime::RuntimeGateway;

impl<R: RuntimeGateway> Reconciler<R> {
    /// Record `new` as the desired state without touching the container.
    ///
    /// Returns the lifecycle flags that changed. Any other difference is a
    /// validation error: the container has to be replaced instead.
    pub fn update(
        &self,
        record: &mut ContainerRecord,
        new: DesiredContainer,
    ) -> Result<Vec<&'static str>, ReconcileError> {
        let immutable = force_new_changes(&record.desired, &new);
        if !immutable.is_empty() {
            return ImmutableChangeSnafu { fields: immutable }.fail();
        }

        let changed = lifecycle_changes(&record.desired, &new);
        if !changed.is_empty() {
            tracing::info!(name = %new.name, fields = ?changed, "updated lifecycle settings");
        }
        record.desired = new;
        Ok(changed)
    }
}
