//! Core library for `blueprint_copy`.
//!
//! Rebuilds a directory layout described by a *blueprint* tree using real files
//! found by basename in a separate source collection. Three entry points share
//! the same indexing and copying primitives:
//!
//! - [`replicate_from_index`]: index the source tree once, then resolve each
//!   blueprint file by basename.
//! - [`replicate_direct`]: probe a flat source directory per blueprint file.
//! - [`copy_matching_dirs`]: copy every source directory holding a requested
//!   filename.
//!
//! Every entry point is a blocking, sequential call returning an
//! [`OperationReport`]. Per-item problems land in the report; only invalid
//! roots and traversal failures surface as [`ReplicateError`].

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod index;
pub mod matcher;
pub mod names;
pub mod output;
pub mod replicate;
pub mod report;

pub use config::{
    Config, LogLevel, default_config_path, default_log_path, load_config,
    load_config_from_xml_path, path_has_symlink_ancestor,
};
pub use errors::ReplicateError;
pub use fs_ops::{CopyOptions, DurabilityMode, copy_dir, copy_file};
pub use index::{FilenameIndex, build_index};
pub use matcher::{DirectoryCopySet, copy_matching_dirs, match_and_group};
pub use names::{parse_name_list, read_name_list};
pub use replicate::{replicate_direct, replicate_from_index};
pub use report::{CopyFailure, Mode, OperationReport};
