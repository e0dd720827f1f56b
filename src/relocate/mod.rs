//! Resilient file relocation.
//!
//! `relocate` moves one file into a destination directory and always answers
//! with a `MoveOutcome`; it never returns an error or panics on I/O trouble.
//!
//! Per attempt:
//! 1. re-check that the source is a regular file (missing -> immediate NotFound)
//! 2. create the destination directory tree
//! 3. recompute the collision-safe destination name
//! 4. rename; on cloud-placeholder or cross-device errors fall back to
//!    copy-then-delete
//!
//! Failed attempts are retried up to `RetryPolicy::max_attempts` with a fixed
//! delay in between. Runs on the caller's thread and blocks for the delays.

mod backend;
mod classify;
mod collision;
mod copy;
mod helpers;
mod request;

pub use backend::{FsBackend, StdFs};
pub use classify::{CLOUD_SIGNATURE, ErrorClass, classify};
pub use collision::collision_safe_path;
pub use copy::{TEMP_PREFIX, copy_via_temp, preserve_metadata};
pub use helpers::io_error_with_help;
pub use request::{FailureKind, MoveOutcome, MoveRequest};

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Fixed-bound, fixed-delay retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first; never below 1.
    pub max_attempts: u32,
    /// Sleep between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

/// Move `source_path` into `destination_directory` as `file_name` (or a
/// suffixed variant), with the default retry policy.
pub fn relocate(
    source_path: &Path,
    destination_directory: &Path,
    file_name: &OsStr,
) -> MoveOutcome {
    let request = MoveRequest::new(source_path, destination_directory, file_name);
    relocate_with(&StdFs, &RetryPolicy::default(), &request)
}

/// Same as [`relocate`] with an explicit backend and policy.
pub fn relocate_with<B: FsBackend>(
    backend: &B,
    policy: &RetryPolicy,
    request: &MoveRequest,
) -> MoveOutcome {
    let max_attempts = policy.max_attempts.max(1);
    let name = request.display_name();
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        let (kind, reason) = match attempt_once(backend, request, &name) {
            Ok(final_path) => {
                info!(
                    src = %request.source_path().display(),
                    dest = %final_path.display(),
                    attempts = attempt,
                    "File relocated"
                );
                return MoveOutcome::Success {
                    final_path,
                    attempts: attempt,
                };
            }
            Err(AttemptError::SourceMissing) => {
                warn!(src = %request.source_path().display(), "Source not found; not retrying");
                return MoveOutcome::Failure {
                    kind: FailureKind::NotFound,
                    reason: format!("Source file not found: {name}"),
                    attempts: attempt,
                };
            }
            Err(AttemptError::Failed { kind, reason }) => (kind, reason),
        };

        if attempt >= max_attempts {
            warn!(file = %name, kind = %kind, attempts = attempt, %reason, "Relocation failed");
            return MoveOutcome::Failure {
                kind,
                reason,
                attempts: attempt,
            };
        }

        debug!(
            file = %name,
            kind = %kind,
            attempt,
            max_attempts,
            delay = ?policy.delay,
            "Attempt failed; retrying"
        );
        if !policy.delay.is_zero() {
            std::thread::sleep(policy.delay);
        }
    }
}

enum AttemptError {
    SourceMissing,
    Failed { kind: FailureKind, reason: String },
}

fn attempt_once<B: FsBackend>(
    backend: &B,
    request: &MoveRequest,
    name: &str,
) -> Result<PathBuf, AttemptError> {
    let src = request.source_path();
    if !backend.is_file(src) {
        return Err(AttemptError::SourceMissing);
    }

    let dest_dir = request.destination_directory();
    backend.create_dir_all(dest_dir).map_err(|e| {
        debug!(error = %helpers::build_message("create destination directory", dest_dir, &e));
        failure_for(classify(&e), name, &e)
    })?;

    let dest = collision_safe_path(dest_dir, request.file_name());

    let rename_err = match backend.rename(src, &dest) {
        Ok(()) => return Ok(dest),
        Err(e) => e,
    };

    let class = classify(&rename_err);
    if !class.wants_copy_fallback() {
        debug!(
            error = %helpers::build_message("rename", src, &rename_err),
            ?class,
            "Direct move failed"
        );
        return Err(failure_for(class, name, &rename_err));
    }

    warn!(
        src = %src.display(),
        dest = %dest.display(),
        error = %rename_err,
        ?class,
        "Direct move failed; falling back to copy-then-delete"
    );
    copy_then_delete(backend, src, &dest).map_err(|e| match class {
        ErrorClass::CloudPlaceholder => AttemptError::Failed {
            kind: FailureKind::CloudPlaceholderConflict,
            reason: format!("Cloud file error for {name}: {e}"),
        },
        _ => failure_for(classify(&e), name, &e),
    })?;
    Ok(dest)
}

/// Copy to `dest`, then remove `src`. If the source cannot be removed the
/// copy is rolled back so the file never exists twice.
fn copy_then_delete<B: FsBackend>(backend: &B, src: &Path, dest: &Path) -> io::Result<()> {
    backend.copy_with_metadata(src, dest)?;
    match backend.remove_file(src) {
        Ok(()) => Ok(()),
        // Someone else already removed the source; our copy is the one left.
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            if let Err(rollback) = backend.remove_file(dest) {
                error!(
                    dest = %dest.display(),
                    error = %rollback,
                    "Failed to roll back copy after source removal failed"
                );
            }
            Err(e)
        }
    }
}

fn failure_for(class: ErrorClass, name: &str, e: &io::Error) -> AttemptError {
    let (kind, reason) = match class {
        ErrorClass::Permission => (
            FailureKind::PermissionDenied,
            format!("Permission denied for file: {name}"),
        ),
        ErrorClass::CloudPlaceholder => (
            FailureKind::CloudPlaceholderConflict,
            format!("Cloud file error for {name}: {e}"),
        ),
        ErrorClass::CrossDevice | ErrorClass::Os => {
            (FailureKind::OtherOs, format!("Error moving {name}: {e}"))
        }
        ErrorClass::Unexpected => (
            FailureKind::Unexpected,
            format!("Unexpected error for {name}: {e}"),
        ),
    };
    AttemptError::Failed { kind, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fs;
    use std::time::Instant;
    use tempfile::tempdir;

    fn quick() -> RetryPolicy {
        RetryPolicy::new(3, Duration::ZERO)
    }

    /// Fails every rename with the given error factory; everything else is real.
    struct RenameFails<F: Fn() -> io::Error> {
        make: F,
        renames: Cell<u32>,
    }

    impl<F: Fn() -> io::Error> FsBackend for RenameFails<F> {
        fn is_file(&self, path: &Path) -> bool {
            StdFs.is_file(path)
        }
        fn create_dir_all(&self, path: &Path) -> io::Result<()> {
            StdFs.create_dir_all(path)
        }
        fn rename(&self, _from: &Path, _to: &Path) -> io::Result<()> {
            self.renames.set(self.renames.get() + 1);
            Err((self.make)())
        }
        fn copy_with_metadata(&self, from: &Path, to: &Path) -> io::Result<()> {
            StdFs.copy_with_metadata(from, to)
        }
        fn remove_file(&self, path: &Path) -> io::Result<()> {
            StdFs.remove_file(path)
        }
    }

    #[test]
    fn policy_never_below_one_attempt() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
    }

    #[test]
    fn plain_move_succeeds_first_try() {
        let td = tempdir().unwrap();
        let src = td.path().join("a.jpg");
        fs::write(&src, b"jpeg").unwrap();
        let dest_dir = td.path().join("out");

        let req = MoveRequest::for_file(&src, &dest_dir).unwrap();
        let outcome = relocate_with(&StdFs, &quick(), &req);

        assert_eq!(outcome.attempts(), 1);
        assert_eq!(outcome.final_path(), Some(dest_dir.join("a.jpg").as_path()));
        assert!(!src.exists());
    }

    #[test]
    fn permanent_permission_error_exhausts_bound() {
        let td = tempdir().unwrap();
        let src = td.path().join("a.jpg");
        fs::write(&src, b"jpeg").unwrap();
        let backend = RenameFails {
            make: || io::Error::from(io::ErrorKind::PermissionDenied),
            renames: Cell::new(0),
        };

        let req = MoveRequest::for_file(&src, &td.path().join("out")).unwrap();
        let outcome = relocate_with(&backend, &quick(), &req);

        assert_eq!(outcome.failure_kind(), Some(FailureKind::PermissionDenied));
        assert_eq!(outcome.reason(), Some("Permission denied for file: a.jpg"));
        assert_eq!(backend.renames.get(), 3);
        assert!(src.exists(), "failure must leave the source untouched");
    }

    #[test]
    fn unexpected_errors_are_retried_then_reported() {
        let td = tempdir().unwrap();
        let src = td.path().join("b.png");
        fs::write(&src, b"png").unwrap();
        let backend = RenameFails {
            make: || io::Error::other("gremlins"),
            renames: Cell::new(0),
        };

        let req = MoveRequest::for_file(&src, &td.path().join("out")).unwrap();
        let outcome = relocate_with(&backend, &quick(), &req);

        assert_eq!(outcome.failure_kind(), Some(FailureKind::Unexpected));
        assert!(outcome.reason().unwrap().contains("gremlins"));
        assert_eq!(outcome.attempts(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn cross_device_uses_copy_fallback() {
        let td = tempdir().unwrap();
        let src = td.path().join("c.png");
        fs::write(&src, b"far away").unwrap();
        let dest_dir = td.path().join("other_fs");
        let backend = RenameFails {
            make: || io::Error::from_raw_os_error(libc::EXDEV),
            renames: Cell::new(0),
        };

        let req = MoveRequest::for_file(&src, &dest_dir).unwrap();
        let outcome = relocate_with(&backend, &quick(), &req);

        assert!(outcome.is_success(), "{outcome:?}");
        assert!(!src.exists());
        assert_eq!(fs::read(dest_dir.join("c.png")).unwrap(), b"far away");
    }

    #[test]
    fn missing_source_is_immediate() {
        let td = tempdir().unwrap();
        let policy = RetryPolicy::new(3, Duration::from_secs(1));
        let req = MoveRequest::new(td.path().join("ghost.png"), td.path().join("out"), "ghost.png");

        let started = Instant::now();
        let outcome = relocate_with(&StdFs, &policy, &req);

        assert!(started.elapsed() < Duration::from_millis(500));
        assert_eq!(outcome.failure_kind(), Some(FailureKind::NotFound));
        assert_eq!(outcome.attempts(), 1);
    }
}
