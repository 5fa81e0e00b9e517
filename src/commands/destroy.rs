// ABOUTME: Destroy command: remove the recorded container and its state file.
// ABOUTME: A missing state file is not an error.

use super::runtime_connection::connect_to_runtime;
use super::state_file;
use berth::config::ReconcilerSettings;
use berth::error::Result;
use berth::output::Output;
use berth::reconcile::Reconciler;
use berth::runtime::RuntimeConfig;
use std::path::Path;

pub async fn destroy(
    state_path: &Path,
    runtime_config: &RuntimeConfig,
    settings: ReconcilerSettings,
    mut output: Output,
) -> Result<()> {
    let Some(mut record) = state_file::load(state_path)? else {
        output.success("Nothing to destroy");
        return Ok(());
    };
    output.start_timer();

    if record.id.is_some() {
        let runtime = connect_to_runtime(runtime_config, &output).await?;
        let reconciler = Reconciler::with_settings(runtime, settings);
        if let Err(e) = reconciler.delete(&mut record).await {
            state_file::save(state_path, &record)?;
            return Err(e.into());
        }
    }

    state_file::remove(state_path)?;
    output.success(&format!("{} destroyed", record.desired.name));
    Ok(())
}
