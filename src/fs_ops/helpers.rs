//! I/O error enrichment.
//!
//! Wraps an `io::Error` with the operation, the path and a short hint derived
//! from the raw OS code, keeping the original `ErrorKind`:
//!
//!   File::open(p).map_err(io_error_with_help("open source", p))?;

use std::io;
use std::path::Path;

fn hint_for_os_code(code: i32) -> Option<&'static str> {
    #[cfg(unix)]
    {
        match code {
            libc::EACCES | libc::EPERM => Some("permission denied; check ownership and modes"),
            libc::ENOENT => Some("path not found; it may have been removed during the run"),
            libc::ENOTDIR => Some("a path component is a file, not a directory"),
            libc::EISDIR => Some("target is a directory"),
            libc::ENOSPC => Some("insufficient space on device"),
            libc::EROFS => Some("read-only filesystem"),
            libc::ELOOP => Some("too many symbolic link levels; possible symlink cycle"),
            libc::ENAMETOOLONG => Some("filename or path too long"),
            libc::EMFILE => Some("process file descriptor limit reached"),
            libc::ENFILE => Some("system-wide file table overflow"),
            _ => None,
        }
    }
    #[cfg(windows)]
    {
        match code {
            5 => Some("access denied; check permissions"),
            2 | 3 => Some("path not found"),
            32 => Some("sharing violation; file is in use"),
            112 => Some("insufficient disk space"),
            19 => Some("write protected media"),
            206 => Some("filename or path too long"),
            _ => None,
        }
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = code;
        None
    }
}

fn hint_for_kind(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and modes"),
        io::ErrorKind::NotFound => Some("path not found; it may have been removed during the run"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        _ => None,
    }
}

/// Format "<op> '<path>': <error> — <hint> [os code: N]".
pub(crate) fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    let hint = match e.raw_os_error() {
        Some(code) => hint_for_os_code(code),
        None => hint_for_kind(e.kind()),
    };
    if let Some(h) = hint {
        msg.push_str(" — ");
        msg.push_str(h);
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

/// Closure for `.map_err(...)` in `io::Result` code: same kind, richer message.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), describe_io_error(op, path, &e))
}
