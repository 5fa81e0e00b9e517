// ABOUTME: Refresh command: re-read the recorded container and report observations.
// ABOUTME: Drops the recorded ID when the container is gone.

use super::runtime_connection::connect_to_runtime;
use super::state_file;
use berth::config::ReconcilerSettings;
use berth::error::{Error, Result};
use berth::output::Output;
use berth::reconcile::{ReadOutcome, Reconciler};
use berth::runtime::RuntimeConfig;
use std::path::Path;

pub async fn refresh(
    state_path: &Path,
    runtime_config: &RuntimeConfig,
    settings: ReconcilerSettings,
    output: Output,
) -> Result<()> {
    let Some(mut record) = state_file::load(state_path)?.filter(|r| r.id.is_some()) else {
        return Err(Error::NothingRecorded(state_path.to_path_buf()));
    };

    let runtime = connect_to_runtime(runtime_config, &output).await?;
    let reconciler = Reconciler::with_settings(runtime, settings);

    let result = reconciler.read(&mut record).await;
    state_file::save(state_path, &record)?;

    match result? {
        ReadOutcome::Present => {
            let observed = record.observed.unwrap_or_default();
            output.report(&format!("{} is running as expected", record.desired.name), &observed);
        }
        ReadOutcome::Absent => output.warning(&format!("{} no longer exists", record.desired.name)),
        ReadOutcome::Drifted => output.warning(&format!(
            "{} had stopped and was removed",
            record.desired.name
        )),
    }
    Ok(())
}
