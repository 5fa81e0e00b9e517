// ABOUTME: Plan command: compare the desired state against the recorded one.
// ABOUTME: Offline; the runtime is never contacted.

use super::state_file;
use berth::config::DesiredContainer;
use berth::diff::{Plan, plan as diff_plan};
use berth::error::Result;
use berth::output::Output;
use serde_json::json;
use std::path::Path;

pub fn plan(desired: DesiredContainer, state_path: &Path, output: Output) -> Result<()> {
    let recorded = state_file::load(state_path)?.filter(|r| r.id.is_some());
    let Some(record) = recorded else {
        output.report(
            &format!("{} will be created", desired.name),
            &json!({ "action": "create" }),
        );
        return Ok(());
    };

    let planned = diff_plan(&record.desired, &desired);
    let message = match &planned {
        Plan::Unchanged => format!("{} is up to date", desired.name),
        Plan::InPlace { fields } => {
            format!("{} will be updated in place: {}", desired.name, fields.join(", "))
        }
        Plan::Replace { fields } => {
            format!("{} will be replaced: {}", desired.name, fields.join(", "))
        }
    };
    output.report(&message, &planned);
    Ok(())
}
