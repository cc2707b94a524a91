//! Filesystem primitives: recursive copy, streaming I/O, metadata and root
//! handling.

mod copy;
mod helpers;
mod io_copy;
mod metadata;
pub(crate) mod paths;

pub use copy::{CopyOptions, copy_dir, copy_dir_with, copy_file, copy_file_with};
pub use helpers::io_error_with_help;
pub use io_copy::DurabilityMode;
