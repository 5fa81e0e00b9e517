// ABOUTME: Attach-and-wait: block until the container stops, optionally capturing output.
// ABOUTME: Capture is best-effort; lines still in flight when the wait ends may be lost.

use super::error::{ReconcileError, WaitSnafu};
use super::reconciler::Reconciler;
use crate::runtime::{LogOptions, RuntimeGateway, WaitCondition};
use crate::types::ContainerId;
use futures::StreamExt;
use parking_lot::Mutex;
use snafu::ResultExt;
use std::sync::Arc;

impl<R: RuntimeGateway> Reconciler<R> {
    /// Wait for the container to stop. With `capture_logs`, returns what the
    /// log stream delivered up to that point.
    pub(super) async fn attach_and_wait(
        &self,
        id: &ContainerId,
        capture_logs: bool,
    ) -> Result<Option<String>, ReconcileError> {
        let captured = Arc::new(Mutex::new(String::new()));

        if capture_logs {
            match self
                .runtime
                .container_logs(id, &LogOptions::follow_all())
                .await
            {
                Ok(mut lines) => {
                    let buffer = Arc::clone(&captured);
                    let container_id = id.clone();
                    tokio::spawn(async move {
                        while let Some(line) = lines.next().await {
                            match line {
                                Ok(line) => {
                                    let text = line.content.trim_end_matches('\n');
                                    tracing::debug!(container_id = %container_id, "container logs: {}", text);
                                    let mut buffer = buffer.lock();
                                    buffer.push_str(text);
                                    buffer.push('\n');
                                }
                                Err(e) => {
                                    tracing::warn!(container_id = %container_id, error = %e, "log stream ended");
                                    break;
                                }
                            }
                        }
                    });
                }
                Err(e) => {
                    tracing::warn!(container_id = %id, error = %e, "unable to follow container logs");
                }
            }
        }

        let exit_code = self
            .runtime
            .wait_container(id, WaitCondition::NotRunning)
            .await
            .context(WaitSnafu { id: id.clone() })?;
        tracing::info!(container_id = %id, exit_code, "attached container finished");

        if !capture_logs {
            return Ok(None);
        }
        // Give the log task a turn to drain lines that are already buffered.
        tokio::task::yield_now().await;
        Ok(Some(captured.lock().clone()))
    }
}
