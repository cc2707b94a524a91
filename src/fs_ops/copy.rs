//! Recursive copier.
//! - `copy_file`: byte copy, then the source permission mode is applied.
//! - `copy_dir`: recreate a directory subtree, delegating files to `copy_file`.
//!
//! Symlinks, devices and sockets get no special treatment: `copy_dir` hands
//! every non-directory entry to `copy_file`, which follows links and reads
//! whatever the entry yields.

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, trace};

use super::helpers::io_error_with_help;
use super::io_copy::{self, DurabilityMode};
use super::metadata;

/// Knobs shared by every copy in one operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyOptions {
    /// Also carry atime/mtime over (best-effort).
    pub preserve_times: bool,
    /// Flush policy for each written file.
    pub durability: DurabilityMode,
    /// Resolve and account, but write nothing.
    pub dry_run: bool,
}

/// Copy one file with default options. Returns the number of bytes written.
pub fn copy_file(src: &Path, dst: &Path) -> io::Result<u64> {
    copy_file_with(src, dst, &CopyOptions::default())
}

/// Copy one file: create/truncate `dst`, stream the bytes, apply `src`'s mode.
pub fn copy_file_with(src: &Path, dst: &Path, opts: &CopyOptions) -> io::Result<u64> {
    let res = io_copy::copy_streaming(src, dst, opts.durability)?;
    let src_meta = fs::metadata(src).map_err(io_error_with_help("stat source", src))?;
    metadata::apply_permissions(dst, &src_meta)?;
    if opts.preserve_times {
        metadata::preserve_times(dst, &src_meta);
    }
    trace!(src = %src.display(), dest = %dst.display(), bytes = res.bytes, "copied file");
    Ok(res.bytes)
}

/// Copy a directory subtree with default options. Returns the number of files copied.
pub fn copy_dir(src: &Path, dst: &Path) -> io::Result<u64> {
    copy_dir_with(src, dst, &CopyOptions::default())
}

/// Recreate `src` at `dst`: create `dst` with ancestors, copy every entry,
/// recurse into subdirectories. The first failing entry aborts this call and
/// is returned to the caller.
///
/// The directory mode is applied after the children are written so that a
/// read-only source directory does not lock its own copy.
pub fn copy_dir_with(src: &Path, dst: &Path, opts: &CopyOptions) -> io::Result<u64> {
    let src_meta = fs::metadata(src).map_err(io_error_with_help("stat source directory", src))?;
    if !src_meta.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("copy source '{}' is not a directory", src.display()),
        ));
    }

    fs::create_dir_all(dst).map_err(io_error_with_help("create directory", dst))?;

    let mut files = 0u64;
    let entries = fs::read_dir(src).map_err(io_error_with_help("read directory", src))?;
    for entry in entries {
        let entry = entry.map_err(io_error_with_help("read directory entry in", src))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        let file_type = entry
            .file_type()
            .map_err(io_error_with_help("stat entry", &from))?;
        if file_type.is_dir() {
            files += copy_dir_with(&from, &to, opts)?;
        } else {
            copy_file_with(&from, &to, opts)?;
            files += 1;
        }
    }

    metadata::apply_permissions(dst, &src_meta)?;
    if opts.preserve_times {
        metadata::preserve_times(dst, &src_meta);
    }
    debug!(src = %src.display(), dest = %dst.display(), files, "copied directory");
    Ok(files)
}
