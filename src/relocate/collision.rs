//! Collision-safe destination naming.
//!
//! Policy:
//! - If `dir/name` is free, use it.
//! - Otherwise append `_N` before the extension (`name_1.ext`, `name_2.ext`, ...)
//!   with N the smallest positive integer not already taken.
//!
//! Notes:
//! - Extension splitting follows `Path::file_stem`/`Path::extension`: the last dot
//!   separates the extension and dotfiles have none (`.env` -> `.env_1`).
//! - Decided purely from the directory's state at call time. Not race-free against
//!   concurrent writers; the relocator recomputes it on every attempt.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

// Conservative filename limits (bytes/characters, platform-specific and approximate).
#[cfg(windows)]
const MAX_FILENAME_LEN: usize = 240;
#[cfg(not(windows))]
const MAX_FILENAME_LEN: usize = 255;

/// A path counts as taken if anything (including a dangling symlink) sits there.
fn is_taken(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Compute the collision-safe destination for `name` inside `dst_dir`.
pub fn collision_safe_path(dst_dir: &Path, name: &OsStr) -> PathBuf {
    let candidate = dst_dir.join(name);
    if !is_taken(&candidate) {
        return candidate;
    }

    let base = Path::new(name);
    let stem: OsString = base
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| name.to_os_string());
    let ext: Option<OsString> = base.extension().map(|e| e.to_os_string());

    let mut n: u64 = 1;
    loop {
        let new_name = build_name_with_suffix(&stem, ext.as_deref(), &format!("_{n}"));
        let candidate = dst_dir.join(&new_name);
        if !is_taken(&candidate) {
            trace!(name = ?name, chosen = ?new_name, "collision resolved");
            return candidate;
        }
        n = n.saturating_add(1);
    }
}

#[cfg(unix)]
fn name_len_units(s: &OsStr) -> usize {
    use std::os::unix::ffi::OsStrExt;
    s.as_bytes().len()
}

#[cfg(not(unix))]
fn name_len_units(s: &OsStr) -> usize {
    s.to_string_lossy().len()
}

/// Join `stem + suffix + ["." + ext]`, shrinking the stem so the result fits
/// within MAX_FILENAME_LEN. The suffix and extension are never truncated.
fn build_name_with_suffix(stem: &OsStr, ext: Option<&OsStr>, suffix: &str) -> OsString {
    let mut overhead = suffix.len();
    let mut ext_part = OsString::new();
    if let Some(e) = ext {
        overhead = overhead.saturating_add(1 + name_len_units(e));
        ext_part.push(".");
        ext_part.push(e);
    }

    let mut stem_os = stem.to_os_string();
    if name_len_units(&stem_os) + overhead > MAX_FILENAME_LEN {
        let budget = MAX_FILENAME_LEN.saturating_sub(overhead).max(1);
        stem_os = truncate_stem(stem, budget);
    }

    let mut new_name = stem_os;
    new_name.push(suffix);
    new_name.push(&ext_part);
    new_name
}

fn truncate_stem(stem: &OsStr, budget: usize) -> OsString {
    if let Some(s) = stem.to_str() {
        let mut acc = String::new();
        for ch in s.chars() {
            if acc.len() + ch.len_utf8() > budget {
                break;
            }
            acc.push(ch);
        }
        if acc.is_empty() {
            acc.push('f');
        }
        return OsString::from(acc);
    }

    #[cfg(unix)]
    {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};
        let bytes = stem.as_bytes();
        OsString::from_vec(bytes[..bytes.len().min(budget)].to_vec())
    }
    #[cfg(not(unix))]
    {
        let lossy = stem.to_string_lossy();
        truncate_stem(OsStr::new(lossy.as_ref()), budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn free_name_is_unchanged() {
        let td = tempdir().unwrap();
        let p = collision_safe_path(td.path(), OsStr::new("cat.png"));
        assert_eq!(p, td.path().join("cat.png"));
    }

    #[test]
    fn first_collision_gets_suffix_one() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("cat.png"), b"x").unwrap();
        let p = collision_safe_path(td.path(), OsStr::new("cat.png"));
        assert_eq!(p, td.path().join("cat_1.png"));
    }

    #[test]
    fn fills_smallest_gap() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("cat.png"), b"x").unwrap();
        fs::write(td.path().join("cat_1.png"), b"x").unwrap();
        fs::write(td.path().join("cat_3.png"), b"x").unwrap();
        let p = collision_safe_path(td.path(), OsStr::new("cat.png"));
        assert_eq!(p, td.path().join("cat_2.png"));
    }

    #[test]
    fn long_stem_is_truncated_but_keeps_suffix_and_ext() {
        let stem = "a".repeat(MAX_FILENAME_LEN);
        let name = build_name_with_suffix(OsStr::new(&stem), Some(OsStr::new("jpg")), "_12");
        let s = name.to_string_lossy();
        assert_eq!(s.len(), MAX_FILENAME_LEN);
        assert!(s.ends_with("_12.jpg"));
    }
}
