//! Operation report and its mutable builder.
//!
//! The builder is threaded through a walk and collects per-item outcomes;
//! `build()` freezes it into the [`OperationReport`] handed to the caller.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Which orchestration produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Blueprint walk resolved through a pre-built filename index.
    Indexed,
    /// Blueprint walk probing a flat source directory.
    Direct,
    /// Name list matched against a source tree; whole directories copied.
    Collect,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Indexed => "indexed",
            Mode::Direct => "direct",
            Mode::Collect => "collect",
        })
    }
}

/// One item that resolved but could not be copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyFailure {
    /// Blueprint basename or requested name (collect mode: directory path).
    pub name: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationReport {
    pub mode: Mode,
    pub dry_run: bool,
    /// Blueprint files walked, or names requested.
    pub total: usize,
    /// Files (blueprint modes) or directories (collect mode) copied.
    pub copied: usize,
    /// Names that matched nothing, in walk/request order.
    pub unresolved: Vec<String>,
    /// Resolved items whose copy failed.
    pub failures: Vec<CopyFailure>,
}

impl OperationReport {
    /// Entries that found a source, whether or not the copy then succeeded.
    pub fn resolved(&self) -> usize {
        self.total - self.unresolved.len()
    }

    /// True when nothing was left unresolved and nothing failed.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty() && self.failures.is_empty()
    }

    /// One-line human summary.
    pub fn summary(&self) -> String {
        format!(
            "[{}{}] total={} resolved={} copied={} unresolved={} failed={}",
            self.mode,
            if self.dry_run { " dry-run" } else { "" },
            self.total,
            self.resolved(),
            self.copied,
            self.unresolved.len(),
            self.failures.len()
        )
    }
}

impl fmt::Display for OperationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

#[derive(Debug)]
pub(crate) struct ReportBuilder {
    mode: Mode,
    dry_run: bool,
    total: usize,
    copied: usize,
    unresolved: Vec<String>,
    failures: Vec<CopyFailure>,
}

impl ReportBuilder {
    pub(crate) fn new(mode: Mode, dry_run: bool) -> Self {
        Self {
            mode,
            dry_run,
            total: 0,
            copied: 0,
            unresolved: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub(crate) fn add_considered(&mut self) {
        self.total += 1;
    }

    pub(crate) fn add_copied(&mut self) {
        self.copied += 1;
    }

    pub(crate) fn add_unresolved(&mut self, name: impl Into<String>) {
        self.unresolved.push(name.into());
    }

    pub(crate) fn add_failure(&mut self, name: impl Into<String>, source: &Path, destination: &Path, message: String) {
        self.failures.push(CopyFailure {
            name: name.into(),
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            message,
        });
    }

    pub(crate) fn build(self) -> OperationReport {
        OperationReport {
            mode: self.mode,
            dry_run: self.dry_run,
            total: self.total,
            copied: self.copied,
            unresolved: self.unresolved,
            failures: self.failures,
        }
    }
}
