// ABOUTME: Apply command: converge the recorded container to the desired state.
// ABOUTME: Reads first, then keeps, updates in place, replaces, or creates.

use super::runtime_connection::connect_to_runtime;
use super::state_file;
use berth::config::{DesiredContainer, ReconcilerSettings};
use berth::diff::{Plan, plan};
use berth::error::Result;
use berth::output::Output;
use berth::reconcile::{ContainerRecord, ReadOutcome, Reconciler};
use berth::runtime::{RuntimeConfig, RuntimeGateway};
use std::path::Path;

pub async fn apply(
    desired: DesiredContainer,
    state_path: &Path,
    runtime_config: &RuntimeConfig,
    settings: ReconcilerSettings,
    mut output: Output,
) -> Result<()> {
    output.start_timer();
    output.progress(&format!("Applying {} ({})", desired.name, desired.image));

    let runtime = connect_to_runtime(runtime_config, &output).await?;
    let reconciler = Reconciler::with_settings(runtime, settings);

    let mut record = state_file::load(state_path)?
        .unwrap_or_else(|| ContainerRecord::new(desired.clone()));

    // The record is saved whatever happened: a failed create may still have
    // recorded (or cleared) an ID.
    let result = converge(&reconciler, &mut record, desired, &output).await;
    state_file::save(state_path, &record)?;
    let summary = result?;

    output.success(&summary);
    Ok(())
}

async fn converge<R: RuntimeGateway>(
    reconciler: &Reconciler<R>,
    record: &mut ContainerRecord,
    desired: DesiredContainer,
    output: &Output,
) -> Result<String> {
    if record.id.is_some() {
        match reconciler.read(record).await? {
            ReadOutcome::Present => match plan(&record.desired, &desired) {
                Plan::Unchanged => {
                    return Ok(format!("{} is up to date", desired.name));
                }
                Plan::InPlace { fields } => {
                    let name = desired.name.clone();
                    reconciler.update(record, desired)?;
                    return Ok(format!("{name} updated in place ({})", fields.join(", ")));
                }
                Plan::Replace { fields } => {
                    output.progress(&format!("  → Replacing: {} changed", fields.join(", ")));
                    reconciler.delete(record).await?;
                }
            },
            ReadOutcome::Absent => {
                output.warning("recorded container no longer exists, recreating");
            }
            ReadOutcome::Drifted => {
                output.warning("recorded container had stopped and was removed, recreating");
            }
        }
    }

    let name = desired.name.clone();
    *record = ContainerRecord::new(desired);
    output.progress("  → Creating container...");
    reconciler.create(record).await?;

    let id = record
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default();
    Ok(format!("{name} created ({id})"))
}
