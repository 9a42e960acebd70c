use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;
use crate::utils::{MediaError, MediaResult};

/// Get file extension as lowercase string
pub fn get_extension(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Extract the file name for log lines, falling back to the full path.
pub fn extract_filename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Reads the whole file, mapping any failure to [`MediaError::Read`].
pub fn read_file(path: impl AsRef<Path>) -> MediaResult<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| MediaError::read(path, e))
}

/// Replaces `target` with `bytes` so readers only ever see the old or the new content.
///
/// The bytes go to a temporary file in the target's directory, are flushed to disk and then
/// renamed over the target. When the target already exists its permissions are carried over.
/// If anything fails the temporary file is removed and the target is left as it was.
pub fn write_atomic(target: impl AsRef<Path>, bytes: &[u8]) -> MediaResult<()> {
    let target = target.as_ref();
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| MediaError::write(target, e))?;
    tmp.write_all(bytes).map_err(|e| MediaError::write(target, e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| MediaError::write(target, e))?;

    if let Some(meta) = fs::metadata(target).ok().filter(|m| m.is_file()) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| MediaError::write(target, e))?;
    }

    tmp.persist(target)
        .map_err(|e| MediaError::write(target, e.error))?;

    debug!("Replaced '{}' ({} bytes)", extract_filename(target), bytes.len());
    Ok(())
}
