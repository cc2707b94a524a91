//! Root handling shared by every mode: absolutizing, validation, overlap
//! checks and re-rooting of relative paths.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

use crate::errors::ReplicateError;

/// Make `path` absolute and drop `.`/`..` segments lexically.
fn absolute_lexical(path: &Path) -> io::Result<PathBuf> {
    let abs = std::path::absolute(path)?;
    let mut out = PathBuf::new();
    for comp in abs.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    Ok(out)
}

/// Absolute, normalized form of `path`. The longest existing prefix is
/// canonicalized (symlinks resolved); the missing tail is appended as-is.
pub(crate) fn resolve_root(role: &'static str, path: &Path) -> Result<PathBuf, ReplicateError> {
    let abs = absolute_lexical(path)
        .map_err(|e| ReplicateError::invalid(role, path, format!("cannot make absolute: {e}")))?;

    let mut existing = abs.as_path();
    let mut tail = Vec::new();
    loop {
        if let Ok(real) = dunce::canonicalize(existing) {
            let mut out = real;
            out.extend(tail.iter().rev());
            return Ok(out);
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(abs),
        }
    }
}

/// Require an existing directory at `path`.
pub(crate) fn require_dir(role: &'static str, path: &Path) -> Result<(), ReplicateError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ReplicateError::invalid(role, path, "not a directory")),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(ReplicateError::invalid(role, path, "does not exist"))
        }
        Err(e) => Err(ReplicateError::invalid(role, path, e.to_string())),
    }
}

/// Refuse a destination that equals or sits inside `other`, a tree that is
/// walked while the destination fills. A destination above `other` is fine.
pub(crate) fn ensure_disjoint(
    dest: &Path,
    other_role: &'static str,
    other: &Path,
) -> Result<(), ReplicateError> {
    if dest == other {
        return Err(ReplicateError::invalid(
            "destination root",
            dest,
            format!("is the same path as the {other_role}"),
        ));
    }
    if dest.starts_with(other) {
        return Err(ReplicateError::invalid(
            "destination root",
            dest,
            format!("must not be inside the {other_role} '{}'", other.display()),
        ));
    }
    Ok(())
}

/// Open `root` and read its first entry, so a missing or unreadable tree
/// fails before anything is written.
pub(crate) fn ensure_walkable(role: &'static str, root: &Path) -> Result<(), ReplicateError> {
    for entry in WalkDir::new(root).max_depth(1).into_iter().take(2) {
        entry.map_err(|e| ReplicateError::traversal(role, root, e))?;
    }
    Ok(())
}

/// Make sure the destination root exists (created with ancestors when missing).
/// In dry-run mode nothing is created; an existing non-directory still fails.
pub(crate) fn prepare_dest_root(dest: &Path, dry_run: bool) -> Result<(), ReplicateError> {
    match fs::metadata(dest) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ReplicateError::invalid("destination root", dest, "exists but is not a directory")),
        Err(_) if dry_run => {
            info!(path = %dest.display(), "dry-run: would create destination root");
            Ok(())
        }
        Err(_) => {
            fs::create_dir_all(dest).map_err(|e| {
                ReplicateError::invalid("destination root", dest, format!("cannot create: {e}"))
            })?;
            info!(path = %dest.display(), "Created destination root");
            Ok(())
        }
    }
}

/// Re-root `path` from `from_root` under `to_root`.
/// Returns None when `path` does not live under `from_root`.
pub(crate) fn reroot(path: &Path, from_root: &Path, to_root: &Path) -> Option<PathBuf> {
    let rel = path.strip_prefix(from_root).ok()?;
    Some(to_root.join(rel))
}
