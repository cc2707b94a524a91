use std::io;
use std::path::Path;

use blueprint_copy::fs_ops::io_error_with_help;

#[test]
fn notfound_fallback_hint_includes_path() {
    let p = Path::new("/nonexistent/path/for/test");
    let f = io_error_with_help("open", p);
    let err = f(io::Error::from(io::ErrorKind::NotFound));
    let msg = format!("{}", err);
    assert!(msg.contains("open"));
    assert!(msg.contains(p.to_string_lossy().as_ref()));
    assert!(msg.contains("path not found"));
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
}

#[cfg(unix)]
#[test]
fn erofs_hint_present() {
    let p = Path::new("/tmp");
    let err = io_error_with_help("write", p)(io::Error::from_raw_os_error(libc::EROFS));
    let msg = format!("{}", err);
    assert!(msg.contains("read-only filesystem"), "msg was: {}", msg);
    assert!(msg.contains("os code"), "should include os code in message");
}

#[cfg(unix)]
#[test]
fn loop_and_name_too_long_hints() {
    let p = Path::new("/tmp");
    let m1 = io_error_with_help("op", p)(io::Error::from_raw_os_error(libc::ELOOP)).to_string();
    let m2 = io_error_with_help("op", p)(io::Error::from_raw_os_error(libc::ENAMETOOLONG)).to_string();
    assert!(m1.contains("symlink cycle"));
    assert!(m2.contains("too long"));
}

#[cfg(unix)]
#[test]
fn fd_limit_hints() {
    let p = Path::new("/tmp");
    let m1 = io_error_with_help("op", p)(io::Error::from_raw_os_error(libc::EMFILE)).to_string();
    let m2 = io_error_with_help("op", p)(io::Error::from_raw_os_error(libc::ENFILE)).to_string();
    assert!(m1.contains("descriptor limit"));
    assert!(m2.contains("file table"));
}

#[test]
fn unknown_error_has_no_hint() {
    let p = Path::new("/tmp/x");
    let msg = io_error_with_help("op", p)(io::Error::other("boom")).to_string();
    assert!(msg.ends_with("boom"), "msg was: {msg}");
}
