//! Human-readable I/O failure text for the relocator and the tasks.
//!
//! `io_error_with_help` is a `map_err` adapter for `anyhow::Result` code:
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create dir", dir))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

use super::classify::{is_cloud_placeholder, is_cross_device};

const CLOUD_HINT: &str =
    " - cloud-sync placeholder; make the file available offline or pause syncing, then retry.";
const CROSS_DEVICE_HINT: &str =
    " - different filesystem; the move falls back to copy-then-delete.";
const PERMISSION_HINT: &str =
    " - permission denied; close programs using the file and check write access.";
const NOT_FOUND_HINT: &str = " - path not found; it may have been moved or deleted.";

/// `op 'path': error`, followed by the hint for its failure class and the OS code.
pub(crate) fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if is_cloud_placeholder(e) {
        msg.push_str(CLOUD_HINT);
    } else if is_cross_device(e) {
        msg.push_str(CROSS_DEVICE_HINT);
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => msg.push_str(PERMISSION_HINT),
            io::ErrorKind::NotFound => msg.push_str(NOT_FOUND_HINT),
            io::ErrorKind::AlreadyExists => {
                msg.push_str(" - already exists; a numbered name is picked on the next attempt.")
            }
            _ => msg.push_str(os_specific_hint(e)),
        }
    }

    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

#[cfg(unix)]
fn os_specific_hint(e: &io::Error) -> &'static str {
    match e.raw_os_error() {
        Some(libc::EBUSY) => " - file is busy; another program is still writing it.",
        Some(libc::ENOSPC) => " - destination is out of space.",
        Some(libc::EROFS) => " - destination is read-only.",
        Some(libc::ENAMETOOLONG) => " - file name or path too long.",
        _ => "",
    }
}

#[cfg(windows)]
fn os_specific_hint(e: &io::Error) -> &'static str {
    match e.raw_os_error() {
        Some(32) | Some(33) => " - file is in use by another program.",
        Some(112) => " - destination is out of space.",
        Some(206) => " - file name or path too long (MAX_PATH exceeded).",
        _ => "",
    }
}

#[cfg(not(any(unix, windows)))]
fn os_specific_hint(_e: &io::Error) -> &'static str {
    ""
}

/// Adapter for anyhow::Result code.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}
