// ABOUTME: Command module aggregator for the berth CLI.
// ABOUTME: Re-exports apply, refresh, destroy, and plan command handlers.

mod apply;
mod destroy;
mod plan;
mod refresh;
mod runtime_connection;
mod state_file;

pub use apply::apply;
pub use destroy::destroy;
pub use plan::plan;
pub use refresh::refresh;
