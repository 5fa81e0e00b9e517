// ABOUTME: Read: existence check, readiness polling and the post-poll decision table.
// ABOUTME: Fresh containers get the full polling budget; existing ones a single inspect.

use super::error::{
    ExitedAfterCreationSnafu, FinishedAtParseSnafu, InspectSnafu, ListSnafu, NotRunningSnafu,
    ReconcileError,
};
use super::reconciler::Reconciler;
use super::record::{ContainerRecord, ObservedState};
use crate::flatten::{flatten_networks, flatten_ports};
use crate::runtime::{ContainerDetails, ContainerFilters, RuntimeGateway};
use crate::types::ContainerId;
use chrono::{DateTime, Utc};
use snafu::ResultExt;

/// What a read found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The container is stable and observations were refreshed.
    Present,
    /// No container with the recorded ID exists; the ID was dropped.
    Absent,
    /// The container had stopped although it must run. It was removed so the
    /// next apply recreates it.
    Drifted,
}

impl<R: RuntimeGateway> Reconciler<R> {
    /// Refresh the record from the runtime.
    ///
    /// A standalone read performs one inspect: the container is assumed to
    /// have settled long ago.
    pub async fn read(&self, record: &mut ContainerRecord) -> Result<ReadOutcome, ReconcileError> {
        self.read_after_create(record, None).await
    }

    /// Read with an optional start timestamp from the same create call.
    ///
    /// With a timestamp the container is polled until it runs, exits on its
    /// own, or the attempt budget runs out.
    pub(super) async fn read_after_create(
        &self,
        record: &mut ContainerRecord,
        created_at: Option<DateTime<Utc>>,
    ) -> Result<ReadOutcome, ReconcileError> {
        let Some(id) = record.id.clone() else {
            return Ok(ReadOutcome::Absent);
        };

        if !self.exists(&id).await? {
            tracing::info!(container_id = %id, "container no longer exists");
            record.forget();
            return Ok(ReadOutcome::Absent);
        }

        let must_run = record.desired.lifecycle.must_run;
        let attempts = match created_at {
            Some(_) => self.settings.poll_attempts.max(1),
            None => 1,
        };

        let mut attempt = 0;
        let details = loop {
            attempt += 1;
            let current = self
                .runtime
                .inspect_container(&id)
                .await
                .context(InspectSnafu { id: id.clone() })?;
            tracing::debug!(
                container_id = %id,
                attempt,
                running = current.running,
                "inspected container"
            );

            if current.running || !must_run {
                break current;
            }

            let Some(created_at) = created_at else {
                tracing::info!(container_id = %id, "container is not running, removing it");
                self.delete(record).await?;
                return Ok(ReadOutcome::Drifted);
            };

            if exited_after(&id, &current, created_at)? {
                self.cleanup(record).await;
                return ExitedAfterCreationSnafu {
                    id,
                    reason: current.error,
                }
                .fail();
            }

            if attempt >= attempts {
                break current;
            }
            tokio::time::sleep(self.settings.poll_interval).await;
        };

        if !details.running && must_run {
            self.cleanup(record).await;
            return NotRunningSnafu { id }.fail();
        }

        let logs = record.observed.take().and_then(|o| o.container_logs);
        record.observed = Some(observe(&details, logs));
        Ok(ReadOutcome::Present)
    }

    /// Exact-ID lookup over all containers, running or not.
    async fn exists(&self, id: &ContainerId) -> Result<bool, ReconcileError> {
        let filters = ContainerFilters {
            all: true,
            ..Default::default()
        };
        let containers = self
            .runtime
            .list_containers(&filters)
            .await
            .context(ListSnafu)?;
        Ok(containers.iter().any(|c| &c.id == id))
    }

    /// Delete without surfacing failures; the caller reports its own error.
    async fn cleanup(&self, record: &mut ContainerRecord) {
        if let Err(e) = self.delete(record).await {
            tracing::warn!(error = %e, "cleanup after failed readiness check did not complete");
        }
    }
}

/// Whether the container's last exit happened after it was started by us.
///
/// An empty finish time means it never exited.
fn exited_after(
    id: &ContainerId,
    details: &ContainerDetails,
    created_at: DateTime<Utc>,
) -> Result<bool, ReconcileError> {
    if details.finished_at.is_empty() {
        return Ok(false);
    }
    let finished = DateTime::parse_from_rfc3339(&details.finished_at).context(
        FinishedAtParseSnafu {
            id: id.clone(),
            value: details.finished_at.clone(),
        },
    )?;
    Ok(finished.with_timezone(&Utc) > created_at)
}

fn observe(details: &ContainerDetails, container_logs: Option<String>) -> ObservedState {
    let first_network = details
        .networks
        .iter()
        .min_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, endpoint)| endpoint);

    ObservedState {
        exit_code: (!details.running).then_some(details.exit_code),
        container_logs,
        ports: flatten_ports(&details.ports),
        network_data: flatten_networks(&details.networks),
        ip_address: first_network.map(|n| n.ip_address.clone()),
        ip_prefix_length: first_network.map(|n| n.ip_prefix_len),
        gateway: first_network.map(|n| n.gateway.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::NetworkEndpoint;
    use chrono::TimeZone;

    fn details(running: bool, finished_at: &str) -> ContainerDetails {
        let mut d = ContainerDetails::new(ContainerId::new("abc"));
        d.running = running;
        d.finished_at = finished_at.to_string();
        d
    }

    fn started() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn zero_finish_time_is_before_start() {
        let d = details(false, "0001-01-01T00:00:00Z");
        assert!(!exited_after(&d.id, &d, started()).unwrap());
    }

    #[test]
    fn later_finish_time_is_an_exit() {
        let d = details(false, "2024-05-01T12:00:01.123456789Z");
        assert!(exited_after(&d.id, &d, started()).unwrap());
    }

    #[test]
    fn garbage_finish_time_is_an_error() {
        let d = details(false, "yesterday");
        assert!(matches!(
            exited_after(&d.id, &d, started()),
            Err(ReconcileError::FinishedAtParse { .. })
        ));
    }

    #[test]
    fn exit_code_only_recorded_when_stopped() {
        let mut d = details(true, "");
        d.exit_code = 3;
        assert_eq!(observe(&d, None).exit_code, None);
        d.running = false;
        assert_eq!(observe(&d, None).exit_code, Some(3));
    }

    #[test]
    fn legacy_address_comes_from_first_network_by_name() {
        let mut d = details(true, "");
        for (name, ip) in [("zeta", "10.1.0.2"), ("alpha", "10.0.0.2")] {
            d.networks.insert(
                name.to_string(),
                NetworkEndpoint {
                    ip_address: ip.to_string(),
                    ip_prefix_len: 24,
                    gateway: String::new(),
                },
            );
        }
        let observed = observe(&d, Some("hello\n".into()));
        assert_eq!(observed.ip_address.as_deref(), Some("10.0.0.2"));
        assert_eq!(observed.network_data.len(), 2);
        assert_eq!(observed.container_logs.as_deref(), Some("hello\n"));
    }
}
