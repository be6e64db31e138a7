//! File helpers shared by the stores and the sync engine.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::DotaiError;

/// Read and parse a JSON file. An absent file is `Ok(None)`; an unreadable
/// or malformed one is an error.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, DotaiError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| DotaiError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_str(&content).map_err(|source| DotaiError::JsonParse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(value))
}

/// [`read_json`] with every failure collapsed to `T::default()`.
pub fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match read_json(path) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            warn!("{e}; using an empty document");
            T::default()
        }
    }
}

/// Write `value` as pretty-printed JSON, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), DotaiError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content + "\n").map_err(|source| DotaiError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "wrote JSON document");
    Ok(())
}

pub fn ensure_dir(path: &Path) -> Result<(), DotaiError> {
    fs::create_dir_all(path).map_err(|source| DotaiError::DirCreate {
        path: path.to_path_buf(),
        source,
    })
}

/// Remove a file or directory tree. Returns `false` if nothing was there.
pub fn remove_path(path: &Path) -> Result<bool, DotaiError> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(source) => {
            return Err(DotaiError::FileRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|source| DotaiError::FileRemove {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "removed");
    Ok(true)
}

/// Make `dst` an exact copy of the directory `src`, discarding whatever was
/// at `dst` before.
pub fn replace_dir(src: &Path, dst: &Path) -> Result<(), DotaiError> {
    if let (Ok(a), Ok(b)) = (src.canonicalize(), dst.canonicalize()) {
        if a == b {
            debug!(path = %src.display(), "source and target are the same directory");
            return Ok(());
        }
    }
    remove_path(dst)?;
    copy_dir_recursive(src, dst)
}

pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<(), DotaiError> {
    ensure_dir(dst)?;

    for entry in walkdir::WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(|e| DotaiError::FileRead {
            path: src.to_path_buf(),
            source: e.into(),
        })?;

        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            ensure_dir(&target)?;
        } else {
            fs::copy(entry.path(), &target).map_err(|source| DotaiError::FileWrite {
                path: target.clone(),
                source,
            })?;
        }
    }
    debug!(from = %src.display(), to = %dst.display(), "copied directory");
    Ok(())
}
