//! Streaming byte copy.
//!
//! - Creates or truncates the destination (re-running a replication overwrites
//!   earlier output in place).
//! - Buffered I/O with 1 MiB buffers to keep the syscall count down.
//! - Optional full fsync of the destination before returning.
//!
//! The source is read once from start to EOF; bytes appended concurrently are
//! not included.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use super::helpers::io_error_with_help;

const BUF_SIZE: usize = 1024 * 1024;

/// Durability mode controlling post-write flush behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DurabilityMode {
    /// Flush into the OS page cache only. Fastest.
    #[default]
    Data,
    /// Force data and metadata to stable storage (`sync_all`).
    Full,
}

/// Result of a streaming copy.
#[derive(Debug, Clone, Copy)]
pub struct CopyResult {
    pub bytes: u64,
}

/// Open `dst` for writing, truncating any previous content.
///
/// A read-only leftover from an earlier run (the source mode is applied to
/// every copy) is made writable once and the open retried.
fn open_truncating(dst: &Path) -> io::Result<File> {
    let mut opts = OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    match opts.open(dst) {
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            let meta = match fs::symlink_metadata(dst) {
                Ok(m) if m.is_file() && m.permissions().readonly() => m,
                _ => return Err(e),
            };
            let mut perms = meta.permissions();
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                perms.set_mode(perms.mode() | 0o200);
            }
            #[cfg(not(unix))]
            perms.set_readonly(false);
            fs::set_permissions(dst, perms)?;
            opts.open(dst)
        }
        other => other,
    }
}

/// Copy `src` -> `dst` through buffered streams.
pub(crate) fn copy_streaming(src: &Path, dst: &Path, mode: DurabilityMode) -> io::Result<CopyResult> {
    let src_f = File::open(src).map_err(io_error_with_help("open source", src))?;
    let dst_f = open_truncating(dst).map_err(io_error_with_help("create destination", dst))?;

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer).map_err(io_error_with_help("copy into", dst))?;
    writer.flush().map_err(io_error_with_help("flush", dst))?;

    if matches!(mode, DurabilityMode::Full) {
        writer
            .get_ref()
            .sync_all()
            .map_err(io_error_with_help("fsync", dst))?;
    }

    Ok(CopyResult { bytes })
}
