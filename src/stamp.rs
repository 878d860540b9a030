//! Timestamp names and collision-free path resolution.
//!
//! Every artefact this crate writes — database backups, safety snapshots,
//! per-run template backup directories — carries a second-resolution
//! `YYYYMMDD_HHMMSS` stamp in its name.  The format is fixed-width, so
//! lexicographic order on the resulting names equals chronological order;
//! the retention logic in [`crate::backup`] relies on that.
//!
//! Two creates within the same second would mint the same name, so
//! [`unique_path`] appends `_1`, `_2`, … until the candidate does not exist.
//! The suffix only appears on an actual collision.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// Second-resolution stamp used in every generated name, e.g. `20250314_091205`.
pub fn timestamp(now: DateTime<Local>) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}

/// Display format for modification times in listings, e.g. `14/03/2025 09:12:05`.
pub fn display_time(t: DateTime<Local>) -> String {
    t.format("%d/%m/%Y %H:%M:%S").to_string()
}

/// Return `dir/<stem><ext>`, disambiguated with `_1`, `_2`, … if taken.
///
/// `ext` must include its leading dot (or be empty for extension-less names).
/// There is a TOCTOU window between the existence check and the caller's
/// write, but these tools assume a single uncontended operator.
pub fn unique_path(dir: &Path, stem: &str, ext: &str) -> PathBuf {
    let candidate = dir.join(format!("{stem}{ext}"));
    if !candidate.exists() {
        return candidate;
    }
    let mut n = 1u32;
    loop {
        let candidate = dir.join(format!("{stem}_{n}{ext}"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
