// ABOUTME: Runtime gateway: capability traits over the container daemon API.
// ABOUTME: Includes the bollard implementation and local socket detection.

mod bollard_runtime;
mod detection;
mod error;
pub mod traits;
mod types;

pub use bollard_runtime::BollardRuntime;
pub use detection::{DetectionError, detect_local};
pub use error::{ConnectionError, RuntimeError, RuntimeErrorKind};
pub use traits::*;
pub use types::{RuntimeConfig, RuntimeInfo, RuntimeType};
