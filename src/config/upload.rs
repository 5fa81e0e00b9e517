// ABOUTME: Files written into the container between create and start.
// ABOUTME: Content is stored verbatim; the executable flag picks the file mode.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSpec {
    pub content: String,

    /// Absolute destination path inside the container.
    pub file: String,

    #[serde(default)]
    pub executable: bool,
}
