//! Sorting io::Errors into the relocator's retry classes.
//!
//! The cloud-placeholder check is a heuristic: it looks for the word "cloud"
//! in the error text and, on Windows, for ERROR_CLOUD_FILE_PROVIDER_NOT_RUNNING.
//! It is not a contract.

use std::io;

/// Lowercase marker looked for in error text and failure reasons.
pub const CLOUD_SIGNATURE: &str = "cloud";

/// ERROR_CLOUD_FILE_PROVIDER_NOT_RUNNING
#[cfg(windows)]
const WIN_CLOUD_PROVIDER_NOT_RUNNING: i32 = 362;
/// ERROR_SHARING_VIOLATION / ERROR_LOCK_VIOLATION
#[cfg(windows)]
const WIN_SHARING_VIOLATIONS: [i32; 2] = [32, 33];
/// ERROR_NOT_SAME_DEVICE
#[cfg(windows)]
const WIN_NOT_SAME_DEVICE: i32 = 17;

/// How the retry loop should treat a failed rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Access denied or locked by another process.
    Permission,
    /// Remote-storage stub not materialized locally; use copy-then-delete.
    CloudPlaceholder,
    /// Rename cannot cross filesystems; use copy-then-delete.
    CrossDevice,
    /// Any other error with an OS code.
    Os,
    /// No OS code and no recognizable kind.
    Unexpected,
}

impl ErrorClass {
    /// Whether this class is handled by the copy-then-delete fallback.
    pub fn wants_copy_fallback(&self) -> bool {
        matches!(self, ErrorClass::CloudPlaceholder | ErrorClass::CrossDevice)
    }
}

pub fn classify(e: &io::Error) -> ErrorClass {
    if is_permission_class(e) {
        return ErrorClass::Permission;
    }
    if is_cloud_placeholder(e) {
        return ErrorClass::CloudPlaceholder;
    }
    if is_cross_device(e) {
        return ErrorClass::CrossDevice;
    }
    if e.raw_os_error().is_some() {
        ErrorClass::Os
    } else {
        ErrorClass::Unexpected
    }
}

fn is_permission_class(e: &io::Error) -> bool {
    if e.kind() == io::ErrorKind::PermissionDenied {
        return true;
    }
    #[cfg(windows)]
    if let Some(code) = e.raw_os_error() {
        return WIN_SHARING_VIOLATIONS.contains(&code);
    }
    false
}

pub fn is_cloud_placeholder(e: &io::Error) -> bool {
    #[cfg(windows)]
    if e.raw_os_error() == Some(WIN_CLOUD_PROVIDER_NOT_RUNNING) {
        return true;
    }
    e.to_string().to_ascii_lowercase().contains(CLOUD_SIGNATURE)
}

pub fn is_cross_device(e: &io::Error) -> bool {
    // std::io::ErrorKind::CrossesDevices is not stable everywhere; check raw codes.
    match e.raw_os_error() {
        #[cfg(unix)]
        Some(code) => code == libc::EXDEV,
        #[cfg(windows)]
        Some(code) => code == WIN_NOT_SAME_DEVICE,
        #[cfg(not(any(unix, windows)))]
        Some(_) => false,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_kind_is_permission() {
        let e = io::Error::from(io::ErrorKind::PermissionDenied);
        assert_eq!(classify(&e), ErrorClass::Permission);
    }

    #[cfg(unix)]
    #[test]
    fn eacces_and_eperm_are_permission() {
        for code in [libc::EACCES, libc::EPERM] {
            let e = io::Error::from_raw_os_error(code);
            assert_eq!(classify(&e), ErrorClass::Permission, "code {code}");
        }
    }

    #[test]
    fn cloud_text_is_cloud() {
        let e = io::Error::other("The Cloud file provider is not running.");
        assert_eq!(classify(&e), ErrorClass::CloudPlaceholder);
        assert!(classify(&e).wants_copy_fallback());
    }

    #[cfg(unix)]
    #[test]
    fn exdev_is_cross_device() {
        let e = io::Error::from_raw_os_error(libc::EXDEV);
        assert_eq!(classify(&e), ErrorClass::CrossDevice);
        assert!(classify(&e).wants_copy_fallback());
    }

    #[cfg(unix)]
    #[test]
    fn other_os_codes_are_os() {
        let e = io::Error::from_raw_os_error(libc::EBUSY);
        assert_eq!(classify(&e), ErrorClass::Os);
        assert!(!classify(&e).wants_copy_fallback());
    }

    #[test]
    fn codeless_errors_are_unexpected() {
        let e = io::Error::other("something odd");
        assert_eq!(classify(&e), ErrorClass::Unexpected);
    }
}
