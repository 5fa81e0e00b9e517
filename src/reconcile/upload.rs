// ABOUTME: Single-file tar archives for uploads copied into the container root.
// ABOUTME: Entry paths are relative to the extraction root.

use crate::config::UploadSpec;
use bytes::Bytes;

/// Directory every upload archive is extracted into.
pub const UPLOAD_ROOT: &str = "/";

const EXECUTABLE_MODE: u32 = 0o744;
const REGULAR_MODE: u32 = 0o644;

/// Build an uncompressed tar stream holding `spec.content` at `spec.file`.
///
/// Archive paths must be relative, so the leading `/` is dropped; extracting
/// at [`UPLOAD_ROOT`] puts the file back at its absolute path.
pub fn upload_archive(spec: &UploadSpec) -> std::io::Result<Bytes> {
    let content = spec.content.as_bytes();
    let mode = if spec.executable {
        EXECUTABLE_MODE
    } else {
        REGULAR_MODE
    };

    let mut ar = tar::Builder::new(Vec::new());
    let mut header = tar::Header::new_gnu();
    header.set_size(content.len() as u64);
    header.set_mode(mode);
    header.set_entry_type(tar::EntryType::Regular);
    // Paths over 100 bytes get a GNU long-name entry.
    ar.append_data(&mut header, spec.file.trim_start_matches('/'), content)?;

    Ok(Bytes::from(ar.into_inner()?))
}
