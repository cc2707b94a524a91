//! Metadata carried over to copies.
//! - Permission mode: always applied; a failure fails the copy.
//! - atime/mtime: only with `preserve_times`; best-effort, failures are logged.

use filetime::{FileTime, set_file_times};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{trace, warn};

use super::helpers::io_error_with_help;

/// Give `dest` the permission bits recorded in `src_meta`.
pub(crate) fn apply_permissions(dest: &Path, src_meta: &fs::Metadata) -> io::Result<()> {
    fs::set_permissions(dest, src_meta.permissions())
        .map_err(io_error_with_help("apply permissions to", dest))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        trace!(
            path = %dest.display(),
            mode = format!("{:o}", src_meta.permissions().mode() & 0o7777),
            "applied source mode"
        );
    }
    Ok(())
}

/// Copy access and modification times from `src_meta` to `dest`.
pub(crate) fn preserve_times(dest: &Path, src_meta: &fs::Metadata) {
    #[cfg(unix)]
    let (at, mt) = {
        use std::os::unix::fs::MetadataExt;
        (
            Some(FileTime::from_unix_time(src_meta.atime(), src_meta.atime_nsec() as u32)),
            Some(FileTime::from_unix_time(src_meta.mtime(), src_meta.mtime_nsec() as u32)),
        )
    };
    #[cfg(not(unix))]
    let (at, mt) = (
        src_meta.accessed().ok().map(FileTime::from_system_time),
        src_meta.modified().ok().map(FileTime::from_system_time),
    );

    let (Some(at), Some(mt)) = (at, mt) else {
        warn!(path = %dest.display(), "source timestamps unavailable; leaving destination times");
        return;
    };
    match set_file_times(dest, at, mt) {
        Ok(()) => trace!(path = %dest.display(), "set atime/mtime on destination"),
        Err(e) => warn!(path = %dest.display(), error = %e, "failed to set atime/mtime on destination"),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    #[test]
    fn mode_and_times_follow_source() {
        let td = tempdir().unwrap();
        let src = td.path().join("s");
        let dst = td.path().join("d");
        fs::write(&src, b"s").unwrap();
        fs::write(&dst, b"d").unwrap();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o640)).unwrap();
        let old = FileTime::from_unix_time(1_000_000_000, 0);
        set_file_times(&src, old, old).unwrap();

        let meta = fs::metadata(&src).unwrap();
        apply_permissions(&dst, &meta).unwrap();
        preserve_times(&dst, &meta);

        let got = fs::metadata(&dst).unwrap();
        assert_eq!(got.permissions().mode() & 0o777, 0o640);
        assert_eq!(FileTime::from_last_modification_time(&got), old);
    }
}
