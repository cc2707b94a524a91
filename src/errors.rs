//! Typed error definitions for blueprint_copy.
//! Only fatal failures live here; per-item copy problems and unresolved names
//! are collected in the [`OperationReport`](crate::report::OperationReport).

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplicateError {
    /// A root path is missing, not a directory, or overlaps another root.
    #[error("Invalid {role} '{}': {reason}", .path.display())]
    InvalidInput {
        role: &'static str,
        path: PathBuf,
        reason: String,
    },

    /// A directory walk step failed (unreadable directory, vanished root, ...).
    #[error("Cannot traverse {role} '{}': {source}", .path.display())]
    Traversal {
        role: &'static str,
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl ReplicateError {
    pub(crate) fn invalid(role: &'static str, path: &Path, reason: impl Into<String>) -> Self {
        ReplicateError::InvalidInput {
            role,
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub(crate) fn traversal(role: &'static str, root: &Path, source: walkdir::Error) -> Self {
        let path = source.path().unwrap_or(root).to_path_buf();
        ReplicateError::Traversal { role, path, source }
    }

    /// Stable numeric code, used for structured logs and the CLI exit status.
    pub fn code(&self) -> i32 {
        match self {
            ReplicateError::InvalidInput { .. } => 2,
            ReplicateError::Traversal { .. } => 3,
        }
    }

    /// Short machine-friendly label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ReplicateError::InvalidInput { .. } => "invalid_input",
            ReplicateError::Traversal { .. } => "traversal",
        }
    }

    /// Path the failure is about.
    pub fn path(&self) -> &Path {
        match self {
            ReplicateError::InvalidInput { path, .. } | ReplicateError::Traversal { path, .. } => {
                path
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_message_names_role_and_path() {
        let err = ReplicateError::invalid("source root", Path::new("/nope"), "does not exist");
        let msg = err.to_string();
        assert!(msg.contains("source root"));
        assert!(msg.contains("/nope"));
        assert!(msg.contains("does not exist"));
        assert_eq!(err.code(), 2);
        assert_eq!(err.kind(), "invalid_input");
    }

    #[test]
    fn traversal_error_falls_back_to_root_path() {
        let td = tempfile::tempdir().unwrap();
        let missing = td.path().join("gone");
        let walk_err = walkdir::WalkDir::new(&missing)
            .into_iter()
            .next()
            .unwrap()
            .unwrap_err();
        let err = ReplicateError::traversal("blueprint root", &missing, walk_err);
        assert_eq!(err.code(), 3);
        assert_eq!(err.path(), missing.as_path());
    }
}
