//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Global flags may appear before or after the subcommand.
//! - --debug is a shorthand for --log-level debug.
//! - Paths pasted with surrounding quotes (common from Windows Explorer) are
//!   unquoted before use.

use clap::{Parser, Subcommand, ValueHint};
use std::path::{Path, PathBuf};

use crate::config::types::{Config, LogLevel};

/// Rebuild a blueprint directory layout from same-named source files.
/// CLI flags override config values (loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Rebuild a blueprint directory layout from same-named source files")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, global = true, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, global = true, value_hint = ValueHint::FilePath, help = "Also write logs to this file")]
    pub log_file: Option<PathBuf>,

    /// Emit logs and the final report as JSON.
    #[arg(long, global = true, help = "Emit logs and the final report as JSON")]
    pub json: bool,

    /// Dry-run: resolve and report, but do not write anything.
    #[arg(long, global = true, help = "Show what would be copied, but do not write files/directories")]
    pub dry_run: bool,

    /// Copy access/modification times as well as permissions.
    #[arg(long, global = true, help = "Copy access/modification times as well as permissions")]
    pub preserve_times: bool,

    /// fsync each copied file before moving on.
    #[arg(long, global = true, help = "Flush every copied file to disk before moving on (slower)")]
    pub fsync: bool,

    /// Print where the config file is looked up, then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,

    /// Write a template config file at the default location, then exit.
    #[arg(long, help = "Write a template config file at the config location and exit")]
    pub init_config: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Recreate the blueprint tree under DEST, filling each file from SOURCE by name.
    Replicate {
        /// Tree whose layout (relative paths) is reproduced.
        #[arg(short = 'b', long, value_hint = ValueHint::DirPath)]
        blueprint: PathBuf,

        /// Where the real files live (searched recursively unless --direct).
        #[arg(short = 's', long, value_hint = ValueHint::DirPath)]
        source: PathBuf,

        /// Destination root (created if missing).
        #[arg(short = 'o', long, value_hint = ValueHint::DirPath)]
        dest: PathBuf,

        /// Look for files directly inside SOURCE only (no index, no recursion).
        #[arg(long)]
        direct: bool,
    },

    /// Copy every SOURCE directory that holds one of the listed filenames.
    Collect {
        /// Tree to search.
        #[arg(short = 's', long, value_hint = ValueHint::DirPath)]
        source: PathBuf,

        /// Destination root (created if missing).
        #[arg(short = 'o', long, value_hint = ValueHint::DirPath)]
        dest: PathBuf,

        /// Text/CSV file whose first column lists the filenames.
        #[arg(long, value_hint = ValueHint::FilePath, required_unless_present = "names")]
        names_file: Option<PathBuf>,

        /// Filename to look for (repeatable).
        #[arg(long = "name", value_name = "NAME")]
        names: Vec<String>,

        /// The names file has no header row.
        #[arg(long)]
        no_header: bool,
    },
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(sanitize_path(lf));
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if self.preserve_times {
            cfg.preserve_times = true;
        }
        if self.fsync {
            cfg.fsync = true;
        }
    }
}

/// Strip whitespace and one pair of surrounding quotes from a user-supplied path.
pub fn sanitize_path(p: &Path) -> PathBuf {
    let raw = p.to_string_lossy();
    let trimmed = raw.trim();
    let inner = if trimmed.len() >= 2
        && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
    {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };
    if inner == raw {
        // untouched; keep non-UTF8 paths intact
        return p.to_path_buf();
    }
    PathBuf::from(inner)
}

pub fn parse() -> Args {
    Args::parse()
}
