//! Input/output pair for a single relocation.
//!
//! A `MoveRequest` is built once per file and never mutated; the relocator
//! produces exactly one `MoveOutcome` for it.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use super::classify::CLOUD_SIGNATURE;

/// What to move and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    source_path: PathBuf,
    destination_directory: PathBuf,
    file_name: OsString,
}

impl MoveRequest {
    pub fn new(
        source_path: impl Into<PathBuf>,
        destination_directory: impl Into<PathBuf>,
        file_name: impl Into<OsString>,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            destination_directory: destination_directory.into(),
            file_name: file_name.into(),
        }
    }

    /// Build a request whose file name is the source's own base name.
    /// Returns None when the source path has no final component (e.g. `/` or `..`).
    pub fn for_file(source_path: &Path, destination_directory: &Path) -> Option<Self> {
        let name = source_path.file_name()?;
        Some(Self::new(source_path, destination_directory, name))
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn destination_directory(&self) -> &Path {
        &self.destination_directory
    }

    pub fn file_name(&self) -> &OsStr {
        &self.file_name
    }

    /// File name for messages (lossy on non-UTF-8 names).
    pub fn display_name(&self) -> String {
        self.file_name.to_string_lossy().into_owned()
    }
}

/// Failure taxonomy reported back to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Source missing at attempt time. Never retried.
    NotFound,
    /// Access denied or file in use; exhausted the retry bound.
    PermissionDenied,
    /// Cloud-sync placeholder could not be materialized by the copy fallback.
    CloudPlaceholderConflict,
    /// Any other OS-reported error.
    OtherOs,
    /// Errors carrying no OS code.
    Unexpected,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::NotFound => "not_found",
            FailureKind::PermissionDenied => "permission_denied",
            FailureKind::CloudPlaceholderConflict => "cloud_placeholder",
            FailureKind::OtherOs => "os_error",
            FailureKind::Unexpected => "unexpected",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one `relocate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Success {
        final_path: PathBuf,
        attempts: u32,
    },
    Failure {
        kind: FailureKind,
        reason: String,
        attempts: u32,
    },
}

impl MoveOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, MoveOutcome::Success { .. })
    }

    pub fn final_path(&self) -> Option<&Path> {
        match self {
            MoveOutcome::Success { final_path, .. } => Some(final_path),
            MoveOutcome::Failure { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            MoveOutcome::Success { .. } => None,
            MoveOutcome::Failure { reason, .. } => Some(reason),
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            MoveOutcome::Success { .. } => None,
            MoveOutcome::Failure { kind, .. } => Some(*kind),
        }
    }

    /// Number of attempts made, including the final one.
    pub fn attempts(&self) -> u32 {
        match self {
            MoveOutcome::Success { attempts, .. } | MoveOutcome::Failure { attempts, .. } => {
                *attempts
            }
        }
    }

    /// True when a failure reason carries the cloud-sync signature; drives
    /// the troubleshooting hint shown by the menu.
    pub fn mentions_cloud(&self) -> bool {
        self.reason()
            .is_some_and(|r| r.to_ascii_lowercase().contains(CLOUD_SIGNATURE))
    }
}
