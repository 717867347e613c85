mod department_csv;
mod valued_text;

pub use department_csv::{write_department_stats, DEPARTMENT_CSV_HEADER};
pub use valued_text::{render_valued_summary, write_valued_summary};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Failures raised while persisting analysis results.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode CSV output {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}

impl WriteError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        WriteError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Replaces `path` with the bytes `fill` writes.
///
/// Content is staged in a temporary file next to the destination and renamed
/// over it only once `fill` succeeds and the data is flushed, so readers see
/// either the previous file or the complete new one. The staging file is
/// removed on every failure path. The parent directory must already exist.
fn replace_file<F>(path: &Path, fill: F) -> Result<(), WriteError>
where
    F: FnOnce(&mut NamedTempFile) -> Result<(), WriteError>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(|err| WriteError::io(path, err))?;
    fill(&mut staged)?;

    staged.flush().map_err(|err| WriteError::io(path, err))?;
    staged
        .as_file()
        .sync_all()
        .map_err(|err| WriteError::io(path, err))?;
    readable_by_all(staged.as_file()).map_err(|err| WriteError::io(path, err))?;

    staged
        .persist(path)
        .map_err(|err| WriteError::io(path, err.error))?;
    Ok(())
}

// Staging files are created owner-only; results are meant to be shared.
#[cfg(unix)]
fn readable_by_all(file: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn readable_by_all(_file: &fs::File) -> std::io::Result<()> {
    Ok(())
}
