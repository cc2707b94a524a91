//! List matching: explicit filenames -> source directories to copy whole.
//!
//! `match_and_group` walks the source tree once and queues the parent
//! directory of every entry whose basename was requested. Directories are kept
//! in a set of normalized absolute paths, so a directory holding several
//! requested files is queued once, and a directory nested inside another
//! queued one is dropped since its ancestor's copy already carries it.
//! `copy_matching_dirs` then copies each queued directory to the same
//! relative location under the destination.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::errors::ReplicateError;
use crate::fs_ops::paths::{ensure_disjoint, prepare_dest_root, reroot, resolve_root};
use crate::fs_ops::{CopyOptions, copy_dir_with};
use crate::report::{Mode, OperationReport, ReportBuilder};

/// Outcome of matching a name list against a source tree.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectoryCopySet {
    /// Parent directories of matched entries, deduplicated and ordered. No
    /// directory in the set lies inside another.
    pub directories: BTreeSet<PathBuf>,
    /// Requested names seen at least once.
    pub found: HashSet<String>,
    /// Requested names never seen, in request order (duplicates kept).
    pub unresolved: Vec<String>,
}

/// Walk `root` once and group matches of `names` by parent directory.
///
/// Blank names are ignored. The root itself is never matched, so every queued
/// directory lies inside `root`. Traversal errors abort the whole match.
pub fn match_and_group<S: AsRef<str>>(
    names: &[S],
    root: &Path,
) -> Result<DirectoryCopySet, ReplicateError> {
    let wanted: HashSet<&str> = names
        .iter()
        .map(|n| n.as_ref())
        .filter(|n| !n.trim().is_empty())
        .collect();

    let mut set = DirectoryCopySet::default();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry.map_err(|e| ReplicateError::traversal("source root", root, e))?;
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if !wanted.contains(name) {
            continue;
        }
        if let Some(parent) = entry.path().parent()
            && set.directories.insert(parent.to_path_buf())
        {
            debug!(name, dir = %parent.display(), "queued directory");
        }
        set.found.insert(name.to_string());
    }

    // Ordered by components, so every descendant follows its ancestor directly.
    let mut covering: Option<PathBuf> = None;
    set.directories.retain(|dir| match &covering {
        Some(anc) if dir.starts_with(anc) => {
            debug!(dir = %dir.display(), ancestor = %anc.display(), "nested in a queued directory");
            false
        }
        _ => {
            covering = Some(dir.clone());
            true
        }
    });

    set.unresolved = names
        .iter()
        .map(|n| n.as_ref())
        .filter(|n| !n.trim().is_empty() && !set.found.contains(*n))
        .map(str::to_string)
        .collect();

    info!(
        root = %root.display(),
        directories = set.directories.len(),
        found = set.found.len(),
        unresolved = set.unresolved.len(),
        "Matched name list"
    );
    Ok(set)
}

/// Copy every source directory that holds a requested name to
/// `dest_root / <path relative to source_root>`.
///
/// A failed directory copy is recorded and the remaining directories are
/// still copied. `total` in the report counts non-blank requested names and
/// `copied` counts directories.
pub fn copy_matching_dirs<S: AsRef<str>>(
    names: &[S],
    source_root: &Path,
    dest_root: &Path,
    opts: &CopyOptions,
) -> Result<OperationReport, ReplicateError> {
    let source = resolve_root("source root", source_root)?;
    let dest = resolve_root("destination root", dest_root)?;
    ensure_disjoint(&dest, "source root", &source)?;

    let set = match_and_group(names, &source)?;
    prepare_dest_root(&dest, opts.dry_run)?;

    let mut report = ReportBuilder::new(Mode::Collect, opts.dry_run);
    for name in names.iter().map(|n| n.as_ref()) {
        if !name.trim().is_empty() {
            report.add_considered();
        }
    }
    for name in &set.unresolved {
        report.add_unresolved(name.as_str());
    }

    if set.directories.is_empty() {
        info!(root = %source.display(), "No directories containing requested files were found");
    }
    for dir in &set.directories {
        let label = dir.display().to_string();
        let Some(target) = reroot(dir, &source, &dest) else {
            report.add_failure(label, dir, &dest, format!("'{}' is not under the source root", dir.display()));
            continue;
        };
        if opts.dry_run {
            info!(src = %dir.display(), dest = %target.display(), "dry-run: would copy directory");
            report.add_copied();
            continue;
        }
        match copy_dir_with(dir, &target, opts) {
            Ok(files) => {
                info!(src = %dir.display(), dest = %target.display(), files, "Copied directory");
                report.add_copied();
            }
            Err(e) => {
                warn!(src = %dir.display(), dest = %target.display(), error = %e, "directory copy failed; continuing");
                report.add_failure(label, dir, &target, e.to_string());
            }
        }
    }

    let report = report.build();
    info!(
        mode = %report.mode,
        total = report.total,
        copied = report.copied,
        unresolved = report.unresolved.len(),
        failed = report.failures.len(),
        "Collect finished"
    );
    Ok(report)
}
