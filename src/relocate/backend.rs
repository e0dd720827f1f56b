//! Filesystem seam for the relocator.
//!
//! `StdFs` is the real implementation. Tests wrap it to inject permission or
//! cloud-placeholder failures without needing a misbehaving filesystem.

use std::fs;
use std::io;
use std::path::Path;

use super::copy::copy_via_temp;

pub trait FsBackend {
    /// True when `path` is currently a regular file (symlinks followed).
    fn is_file(&self, path: &Path) -> bool;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Direct move; atomic where the filesystem allows it.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Byte copy plus best-effort timestamps/permissions; `to` is created fresh.
    fn copy_with_metadata(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StdFs;

impl FsBackend for StdFs {
    fn is_file(&self, path: &Path) -> bool {
        fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn copy_with_metadata(&self, from: &Path, to: &Path) -> io::Result<()> {
        copy_via_temp(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}
