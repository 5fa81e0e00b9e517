// ABOUTME: Delete: optional graceful stop, forced removal, wait for confirmed removal.
// ABOUTME: Already-gone containers and concurrent removals are not errors.

use super::error::{ReconcileError, RemoveSnafu, StopSnafu, WaitRemovalSnafu};
use super::reconciler::Reconciler;
use super::record::ContainerRecord;
use crate::runtime::{ContainerError, RemoveOptions, RuntimeGateway, WaitCondition};
use snafu::ResultExt;

impl<R: RuntimeGateway> Reconciler<R> {
    /// Remove the record's container and clear its ID.
    ///
    /// With `rm` set the daemon already discarded the container, so only the
    /// ID is cleared.
    pub async fn delete(&self, record: &mut ContainerRecord) -> Result<(), ReconcileError> {
        let Some(id) = record.id.clone() else {
            return Ok(());
        };
        let lifecycle = &record.desired.lifecycle;

        if lifecycle.rm {
            tracing::debug!(container_id = %id, "auto-removed container, clearing id");
            record.forget();
            return Ok(());
        }

        if !lifecycle.attach
            && let Some(grace) = lifecycle.destroy_grace_period.filter(|g| !g.is_zero())
        {
            tracing::debug!(container_id = %id, grace = ?grace, "stopping container");
            match self.runtime.stop_container(&id, grace).await {
                Ok(()) | Err(ContainerError::NotRunning(_)) => {}
                Err(ContainerError::NotFound(_)) => {
                    tracing::debug!(container_id = %id, "container already gone before stop");
                }
                Err(e) => return Err(e).context(StopSnafu { id }),
            }
        }

        let opts = RemoveOptions {
            force: true,
            remove_volumes: true,
        };
        match self.runtime.remove_container(&id, &opts).await {
            Ok(()) => {}
            Err(ContainerError::NotFound(_) | ContainerError::RemovalInProgress(_)) => {
                tracing::debug!(container_id = %id, "container already being removed");
            }
            Err(e) => return Err(e).context(RemoveSnafu { id }),
        }

        match self
            .runtime
            .wait_container(&id, WaitCondition::Removed)
            .await
        {
            Ok(code) => {
                tracing::info!(container_id = %id, exit_code = code, "container removed");
            }
            Err(ContainerError::NotFound(_) | ContainerError::RemovalInProgress(_)) => {
                tracing::info!(container_id = %id, "container removed");
            }
            Err(e) => return Err(e).context(WaitRemovalSnafu { id }),
        }

        record.forget();
        Ok(())
    }
}
