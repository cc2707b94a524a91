//! Blueprint replication.
//!
//! Walks a blueprint tree and, for each file, finds a same-named source file
//! and copies it to `dest_root / <path relative to blueprint_root>`.
//! Two resolvers are available:
//! - indexed: one walk of the source tree builds a [`FilenameIndex`]; each
//!   blueprint file is then an O(1) lookup.
//! - direct: `source_root / basename` is probed; the source must be flat.
//!
//! A blueprint file without a source is recorded as unresolved, a failed copy
//! as a failure; both keep the walk going. Only invalid roots and traversal
//! errors end the call early.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::errors::ReplicateError;
use crate::fs_ops::paths::{
    ensure_disjoint, ensure_walkable, prepare_dest_root, require_dir, reroot, resolve_root,
};
use crate::fs_ops::{CopyOptions, copy_file_with, io_error_with_help};
use crate::index::FilenameIndex;
use crate::report::{Mode, OperationReport, ReportBuilder};

/// The three roots of a blueprint operation, absolute and normalized.
#[derive(Debug)]
struct Roots {
    blueprint: PathBuf,
    source: PathBuf,
    dest: PathBuf,
}

impl Roots {
    fn resolve(blueprint: &Path, source: &Path, dest: &Path) -> Result<Self, ReplicateError> {
        let roots = Roots {
            blueprint: resolve_root("blueprint root", blueprint)?,
            source: resolve_root("source root", source)?,
            dest: resolve_root("destination root", dest)?,
        };
        ensure_disjoint(&roots.dest, "source root", &roots.source)?;
        ensure_disjoint(&roots.dest, "blueprint root", &roots.blueprint)?;
        Ok(roots)
    }
}

/// Replicate `blueprint_root`'s layout under `dest_root`, resolving each
/// blueprint basename through an index of `source_root` (searched recursively).
///
/// A missing or unreadable source or blueprint tree surfaces as
/// [`ReplicateError::Traversal`].
pub fn replicate_from_index(
    blueprint_root: &Path,
    source_root: &Path,
    dest_root: &Path,
    opts: &CopyOptions,
) -> Result<OperationReport, ReplicateError> {
    let roots = Roots::resolve(blueprint_root, source_root, dest_root)?;
    let index = FilenameIndex::build(&roots.source)?;
    ensure_walkable("blueprint root", &roots.blueprint)?;
    prepare_dest_root(&roots.dest, opts.dry_run)?;
    walk_blueprint(Mode::Indexed, &roots, opts, |name| {
        index.get(name).map(Path::to_path_buf)
    })
}

/// Replicate `blueprint_root`'s layout under `dest_root`, looking for each
/// blueprint basename directly inside the flat `source_root`.
///
/// Both roots are checked up front; a missing root or a non-directory is
/// reported as [`ReplicateError::InvalidInput`] before anything is written.
pub fn replicate_direct(
    blueprint_root: &Path,
    source_root: &Path,
    dest_root: &Path,
    opts: &CopyOptions,
) -> Result<OperationReport, ReplicateError> {
    require_dir("blueprint root", blueprint_root)?;
    require_dir("source root", source_root)?;
    let roots = Roots::resolve(blueprint_root, source_root, dest_root)?;
    ensure_walkable("blueprint root", &roots.blueprint)?;
    prepare_dest_root(&roots.dest, opts.dry_run)?;
    walk_blueprint(Mode::Direct, &roots, opts, |name| probe_flat(&roots.source, name))
}

fn probe_flat(source_root: &Path, name: &OsStr) -> Option<PathBuf> {
    let candidate = source_root.join(name);
    match fs::metadata(&candidate) {
        Ok(meta) if meta.is_file() => Some(candidate),
        _ => None,
    }
}

fn walk_blueprint<F>(
    mode: Mode,
    roots: &Roots,
    opts: &CopyOptions,
    mut resolve: F,
) -> Result<OperationReport, ReplicateError>
where
    F: FnMut(&OsStr) -> Option<PathBuf>,
{
    let mut report = ReportBuilder::new(mode, opts.dry_run);

    for entry in WalkDir::new(&roots.blueprint) {
        let entry =
            entry.map_err(|e| ReplicateError::traversal("blueprint root", &roots.blueprint, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        report.add_considered();

        let name = entry.file_name();
        let label = name.to_string_lossy().into_owned();
        let Some(src) = resolve(name) else {
            debug!(name = %label, blueprint = %entry.path().display(), "no source file for blueprint entry");
            report.add_unresolved(label);
            continue;
        };
        let Some(dest) = reroot(entry.path(), &roots.blueprint, &roots.dest) else {
            report.add_failure(
                label,
                &src,
                entry.path(),
                format!("'{}' is not under the blueprint root", entry.path().display()),
            );
            continue;
        };
        // Possible when the destination root sits above the source root.
        if dest == src {
            warn!(name = %label, path = %src.display(), "destination is the source file; skipping");
            report.add_failure(label, &src, &dest, "destination is the source file itself".to_string());
            continue;
        }

        match place_file(&src, &dest, opts) {
            Ok(()) => report.add_copied(),
            Err(e) => {
                warn!(name = %label, src = %src.display(), dest = %dest.display(), error = %e, "copy failed; continuing");
                report.add_failure(label, &src, &dest, e.to_string());
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
        "Replication finished"
    );
    Ok(report)
}

/// Create the destination's ancestors and copy `src` there.
fn place_file(src: &Path, dest: &Path, opts: &CopyOptions) -> io::Result<()> {
    if opts.dry_run {
        info!(src = %src.display(), dest = %dest.display(), "dry-run: would copy file");
        return Ok(());
    }
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(io_error_with_help("create directory", parent))?;
    }
    copy_file_with(src, dest, opts)?;
    debug!(src = %src.display(), dest = %dest.display(), "placed file");
    Ok(())
}
