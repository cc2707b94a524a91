//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/log paths and opens/creates the files with
//! conservative permissions.

use anyhow::{Context, Result, anyhow};
use dirs::{config_dir, data_dir};
use std::env;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{APP_DIR, CONFIG_ENV, CONFIG_FILE_NAME, LOG_FILE_NAME};

/// Config file location: `$BLUEPRINT_COPY_CONFIG` when set (relative values are
/// taken from the current directory), else `<config dir>/blueprint_copy/config.xml`.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV) {
        let p = PathBuf::from(p);
        return std::path::absolute(&p)
            .with_context(|| format!("resolve {CONFIG_ENV} '{}'", p.display()));
    }
    let base = config_dir()
        .or_else(|| env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok_or_else(|| anyhow!("cannot determine a config directory (no HOME)"))?;
    Ok(base.join(APP_DIR).join(CONFIG_FILE_NAME))
}

/// Default log file location. Sits next to an explicitly chosen config file,
/// otherwise under `<data dir>/blueprint_copy/`.
pub fn default_log_path() -> Result<PathBuf> {
    if env::var_os(CONFIG_ENV).is_some() {
        let cfg = default_config_path()?;
        let parent = cfg
            .parent()
            .ok_or_else(|| anyhow!("config path '{}' has no parent", cfg.display()))?;
        return Ok(parent.join(LOG_FILE_NAME));
    }
    let base = data_dir()
        .or_else(|| env::var_os("HOME").map(|h| PathBuf::from(h).join(".local").join("share")))
        .ok_or_else(|| anyhow!("cannot determine a data directory (no HOME)"))?;
    Ok(base.join(APP_DIR).join(LOG_FILE_NAME))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.as_os_str().is_empty() {
            break;
        }
        match fs::symlink_metadata(anc) {
            Ok(meta) if meta.file_type().is_symlink() => return Ok(true),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        p = anc.parent();
    }
    Ok(false)
}

/// Open a log file for appending; new files get mode 0600 on Unix.
pub fn open_log_file_append(path: &Path) -> io::Result<File> {
    let mut opts = OpenOptions::new();
    opts.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    opts.open(path)
}

/// Write a new file (never clobbering) with mode 0600 on Unix; the parent is
/// created with mode 0700 when missing.
pub(crate) fn write_new_private(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent).with_context(|| format!("create '{}'", parent.display()))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(parent, fs::Permissions::from_mode(0o700));
        }
    }

    let mut opts = OpenOptions::new();
    opts.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    let mut f = opts
        .open(path)
        .with_context(|| format!("create '{}'", path.display()))?;
    f.write_all(contents)
        .with_context(|| format!("write '{}'", path.display()))?;
    f.sync_all().with_context(|| format!("fsync '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[cfg(unix)]
    #[test]
    fn symlinked_ancestor_is_detected() {
        let td = tempdir().unwrap();
        let real = td.path().join("real");
        fs::create_dir_all(&real).unwrap();
        let link = td.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        assert!(path_has_symlink_ancestor(&link.join("app.log")).unwrap());
        assert!(!path_has_symlink_ancestor(&real.join("app.log")).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn private_write_sets_modes_and_refuses_overwrite() {
        use std::os::unix::fs::PermissionsExt;
        let td = tempdir().unwrap();
        let path = td.path().join("newdir").join("config.xml");

        write_new_private(&path, b"<config/>").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
        let dir_mode = fs::metadata(path.parent().unwrap()).unwrap().permissions().mode() & 0o777;
        assert_eq!(dir_mode, 0o700);

        assert!(write_new_private(&path, b"again").is_err());
        assert_eq!(fs::read(&path).unwrap(), b"<config/>");
    }
}
