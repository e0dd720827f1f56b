//! Copy-then-delete building blocks used by the fallback path.
//! - Copies into a hidden temp sibling in the destination directory
//! - Fsyncs the temp file, then renames it into place
//! - Carries timestamps and permission bits over (best-effort)
//!
//! The temp file is removed on any failure so no partial artifact is left
//! under the final name.

use filetime::{FileTime, set_file_times};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{trace, warn};

/// Prefix of the transient names created in destination directories.
pub const TEMP_PREFIX: &str = ".taskmate.";

pub(super) fn unique_temp_path(dst_dir: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    dst_dir.join(format!("{TEMP_PREFIX}{pid}.{nanos}.tmp"))
}

/// Copy `src` to `dest` through a temp sibling; `dest` must not exist yet.
pub fn copy_via_temp(src: &Path, dest: &Path) -> io::Result<()> {
    let dest_dir = dest
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "destination has no parent"))?;
    let tmp = unique_temp_path(dest_dir);

    let result = (|| -> io::Result<()> {
        let mut reader = File::open(src)?;
        let mut writer = OpenOptions::new().write(true).create_new(true).open(&tmp)?;
        io::copy(&mut reader, &mut writer)?;
        writer.sync_all()?;
        drop(writer);

        let meta = fs::metadata(src)?;
        preserve_metadata(&tmp, &meta);

        fs::rename(&tmp, dest)?;
        #[cfg(unix)]
        {
            // Persist the rename; a failed dir fsync doesn't undo it.
            let _ = File::open(dest_dir).and_then(|d| d.sync_all());
        }
        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

/// Copy atime/mtime and, on Unix, mode bits from `src_meta` to `dest`.
/// Failures are logged and ignored.
pub fn preserve_metadata(dest: &Path, src_meta: &fs::Metadata) {
    let at = FileTime::from_last_access_time(src_meta);
    let mt = FileTime::from_last_modification_time(src_meta);
    if let Err(e) = set_file_times(dest, at, mt) {
        warn!(path = %dest.display(), error = %e, "failed to set atime/mtime on destination");
    } else {
        trace!(path = %dest.display(), "set atime/mtime on destination");
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = src_meta.permissions().mode() & 0o777;
        if let Err(e) = fs::set_permissions(dest, fs::Permissions::from_mode(mode)) {
            warn!(
                path = %dest.display(),
                mode = format!("{:o}", mode),
                error = %e,
                "failed to set permissions on destination"
            );
        }
    }
    #[cfg(windows)]
    {
        if let Ok(meta) = fs::metadata(dest) {
            let mut perms = meta.permissions();
            perms.set_readonly(src_meta.permissions().readonly());
            let _ = fs::set_permissions(dest, perms);
        }
    }
}
