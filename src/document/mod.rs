//! Reading and writing YAML documents.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use serde_yaml::Value;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::{MAX_DOCUMENT_BYTES, OUTPUT_SUFFIX};
use crate::error::{Error, Result};

/// Sibling output path: the input path with [`OUTPUT_SUFFIX`] appended.
pub fn output_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(OUTPUT_SUFFIX);
    PathBuf::from(name)
}

/// Whether `a` and `b` name the same file once `.`/`..` components and
/// symlinks are resolved. Neither path needs to exist.
pub fn same_target(a: &Path, b: &Path) -> bool {
    resolved_identity(a) == resolved_identity(b)
}

fn resolved_identity(path: &Path) -> PathBuf {
    if let Ok(real) = std::fs::canonicalize(path) {
        return real;
    }

    if let Some(name) = path.file_name() {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if let Ok(real_parent) = std::fs::canonicalize(parent) {
            return real_parent.join(name);
        }
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };
    normalize_lexically(&absolute)
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Read and parse a YAML document.
///
/// Missing files, directories and files over [`MAX_DOCUMENT_BYTES`] are
/// rejected before reading.
pub fn read_document(path: &Path) -> Result<Value> {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::InputMissing {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(Error::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if metadata.is_dir() {
        return Err(Error::InputIsDirectory {
            path: path.to_path_buf(),
        });
    }

    if metadata.len() > MAX_DOCUMENT_BYTES {
        return Err(Error::InputTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit: MAX_DOCUMENT_BYTES,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", content.len(), path.display());

    serde_yaml::from_str(&content).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a document to YAML text.
pub fn render_document(value: &Value) -> Result<String> {
    serde_yaml::to_string(value).map_err(Error::Serialize)
}

/// Write `contents` to `path` atomically.
///
/// The data goes to a temporary file in the destination directory which is
/// then renamed over `path`, so a failed write never leaves a partial file.
pub fn write_document(path: &Path, contents: &str) -> Result<()> {
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(write_err)?;
    }

    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
