//! Local candidate collection
//!
//! Walks the local root and derives the remote key every regular file would
//! occupy after upload. Symlinks are never followed and never become
//! candidates, so a link pointing outside the tree cannot smuggle content
//! into the comparison.

use preflight_types::{Error, FileCandidate, Result};
use std::path::Path;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Normalize a raw remote prefix
///
/// Strips every leading and trailing `/`. A non-empty remainder gains exactly
/// one trailing `/` so keys concatenate cleanly; an empty remainder (including
/// inputs that were only slashes) yields the empty string and keys are bare
/// relative paths.
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}/", trimmed)
    }
}

/// Collect upload candidates under `root_dir`
///
/// Fails with [`Error::DirectoryNotFound`] when the root does not exist or is
/// not a directory. The returned candidates are sorted ascending by remote
/// key, so identical trees always produce the identical candidate list.
pub fn collect<P: AsRef<Path>>(root_dir: P, remote_prefix: &str) -> Result<Vec<FileCandidate>> {
    let root_dir = root_dir.as_ref();
    let root = match std::fs::canonicalize(root_dir) {
        Ok(root) => root,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::directory_not_found(root_dir));
        }
        Err(e) => {
            return Err(Error::Io {
                message: format!("Failed to canonicalize '{}': {}", root_dir.display(), e),
            });
        }
    };
    if !root.is_dir() {
        return Err(Error::directory_not_found(root_dir));
    }

    let prefix = normalize_prefix(remote_prefix);
    let mut candidates = Vec::new();

    for entry in WalkDir::new(&root).follow_links(false) {
        let entry = entry.map_err(|e| Error::Io {
            message: format!("Failed to walk '{}': {}", root.display(), e),
        })?;

        let file_type = entry.file_type();
        if file_type.is_symlink() {
            trace!("Skipping symlink: {}", entry.path().display());
            continue;
        }
        if !file_type.is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(&root).map_err(|e| Error::Io {
            message: format!(
                "Failed to relativize '{}' against '{}': {}",
                entry.path().display(),
                root.display(),
                e
            ),
        })?;
        let remote_key = format!("{}{}", prefix, relative_key(relative));
        candidates.push(FileCandidate::new(entry.path(), remote_key));
    }

    candidates.sort_by(|a, b| a.remote_key.cmp(&b.remote_key));

    // Lossy name conversion is the only way two files can share one key;
    // collapsing them silently would drop a file from the comparison.
    if let Some(pair) = candidates
        .windows(2)
        .find(|pair| pair[0].remote_key == pair[1].remote_key)
    {
        return Err(Error::other(format!(
            "Duplicate remote key '{}' for '{}' and '{}'",
            pair[0].remote_key,
            pair[0].local_path.display(),
            pair[1].local_path.display()
        )));
    }

    debug!(
        "Collected {} candidates under '{}' with prefix '{}'",
        candidates.len(),
        root.display(),
        prefix
    );
    Ok(candidates)
}

/// Render a root-relative path with POSIX separators regardless of host OS
fn relative_key(relative: &Path) -> String {
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
