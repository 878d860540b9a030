//! Obsolete-template removal with a critical-file gate.
//!
//! The cleanup run has two halves:
//!
//! 1. [`verify_critical`] — read-only existence checks over the critical
//!    list.  If anything is missing the binary cancels the run outright.
//! 2. [`prune_obsolete`] — creates a fresh `backup_templates_<stamp>`
//!    directory, then copies each obsolete file into it (flattened to its
//!    base name) and deletes the original.
//!
//! Per-file copy/delete errors are caught and recorded as [`FileOutcome::Failed`]
//! so one stubborn file never stops the rest of the run.  The flattening
//! means two obsolete files with the same base name would land on the same
//! backup path; the lists in use today have no such pair.
//!
//! Like [`crate::backup`], nothing here prints — the functions return plain
//! data and take an observer callback for live narration.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::stamp;

/// Name prefix of the per-run template backup directory.
pub const TEMPLATE_BACKUP_PREFIX: &str = "backup_templates";

// ─── Types ────────────────────────────────────────────────────────────────────

/// Existence check results for the critical list, in list order.
#[derive(Debug)]
pub struct CriticalStatus {
    /// `(relative path, present?)` per critical file.
    pub files: Vec<(String, bool)>,
}

impl CriticalStatus {
    /// `true` when every critical file exists.
    pub fn all_present(&self) -> bool {
        self.files.iter().all(|(_, present)| *present)
    }

    /// Paths of the missing critical files, in list order.
    pub fn missing(&self) -> Vec<&str> {
        self.files
            .iter()
            .filter(|(_, present)| !present)
            .map(|(path, _)| path.as_str())
            .collect()
    }
}

/// What happened to one obsolete file.
#[derive(Debug)]
pub enum FileOutcome {
    /// Backed up and deleted.
    Removed {
        /// Where the flat copy landed inside the run's backup directory.
        backed_up_to: PathBuf,
    },
    /// The file was already gone; nothing to do.
    NotFound,
    /// Copy or delete failed; the original is left as-is.
    Failed(String),
}

/// Summary of one cleanup run.
#[derive(Debug)]
pub struct CleanupReport {
    /// The `backup_templates_<stamp>` directory created for this run.
    pub backup_dir: PathBuf,
    /// Per-file outcomes, in obsolete-list order.
    pub outcomes: Vec<(String, FileOutcome)>,
}

impl CleanupReport {
    pub fn removed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Removed { .. }))
    }

    pub fn not_found(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::NotFound))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

// ─── Operations ───────────────────────────────────────────────────────────────

/// Check that each critical file exists under `root`.  Read-only.
pub fn verify_critical(root: &Path, critical: &[String]) -> CriticalStatus {
    CriticalStatus {
        files: critical
            .iter()
            .map(|rel| (rel.clone(), root.join(rel).is_file()))
            .collect(),
    }
}

/// Back up and delete each obsolete file under `root`.
///
/// A fresh backup directory is created unconditionally, even when the
/// obsolete list is empty, so every run leaves a dated marker of when it
/// happened.  `observe` is called once per file, after its outcome is
/// known — the binary uses it to tick a progress bar and print per-file
/// lines while the run is still going.
///
/// Only the creation of the backup directory itself can fail the whole run;
/// per-file errors are folded into the report.
pub fn prune_obsolete(
    root: &Path,
    obsolete: &[String],
    now: DateTime<Local>,
    mut observe: impl FnMut(&str, &FileOutcome),
) -> std::io::Result<CleanupReport> {
    let stem = format!("{TEMPLATE_BACKUP_PREFIX}_{}", stamp::timestamp(now));
    let backup_dir = stamp::unique_path(root, &stem, "");
    fs::create_dir_all(&backup_dir)?;

    let mut outcomes = Vec::with_capacity(obsolete.len());
    for rel in obsolete {
        let outcome = prune_one(root, rel, &backup_dir);
        observe(rel, &outcome);
        outcomes.push((rel.clone(), outcome));
    }

    Ok(CleanupReport {
        backup_dir,
        outcomes,
    })
}

/// Back up one file (flattened to its base name), then delete the original.
fn prune_one(root: &Path, rel: &str, backup_dir: &Path) -> FileOutcome {
    let original = root.join(rel);
    if !original.exists() {
        return FileOutcome::NotFound;
    }

    let base = match original.file_name() {
        Some(base) => base.to_os_string(),
        None => return FileOutcome::Failed(format!("'{rel}' has no file name")),
    };
    let backed_up_to = backup_dir.join(base);

    if let Err(e) = fs::copy(&original, &backed_up_to) {
        return FileOutcome::Failed(format!("copying to backup: {e}"));
    }
    if let Err(e) = fs::remove_file(&original) {
        return FileOutcome::Failed(format!("deleting original: {e}"));
    }

    FileOutcome::Removed { backed_up_to }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tempfile::TempDir;

    use super::*;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 14, 9, 12, 5).unwrap()
    }

    /// Lay down `files` (with tiny unique contents) under `root`.
    fn seed(root: &Path, files: &[&str]) {
        for rel in files {
            let path = root.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, format!("content of {rel}")).unwrap();
        }
    }

    fn list(files: &[&str]) -> Vec<String> {
        files.iter().map(|s| s.to_string()).collect()
    }

    // ── verify_critical ───────────────────────────────────────────────────────

    #[test]
    fn verify_reports_all_present() {
        let root = TempDir::new().unwrap();
        seed(root.path(), &["templates/base.html", "templates/a/b.html"]);

        let status = verify_critical(
            root.path(),
            &list(&["templates/base.html", "templates/a/b.html"]),
        );
        assert!(status.all_present());
        assert!(status.missing().is_empty());
    }

    #[test]
    fn verify_reports_missing_files_in_order() {
        let root = TempDir::new().unwrap();
        seed(root.path(), &["templates/base.html"]);

        let status = verify_critical(
            root.path(),
            &list(&["templates/gone.html", "templates/base.html", "templates/also_gone.html"]),
        );
        assert!(!status.all_present());
        assert_eq!(status.missing(), vec![
            "templates/gone.html",
            "templates/also_gone.html"
        ]);
    }

    #[test]
    fn verify_does_not_touch_the_filesystem() {
        let root = TempDir::new().unwrap();
        seed(root.path(), &["templates/base.html"]);

        verify_critical(root.path(), &list(&["templates/base.html"]));

        // No backup directory, no deletions.
        let entries: Vec<_> = fs::read_dir(root.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert!(root.path().join("templates/base.html").exists());
    }

    // ── prune_obsolete ────────────────────────────────────────────────────────

    #[test]
    fn prune_backs_up_then_deletes_each_file() {
        let root = TempDir::new().unwrap();
        seed(root.path(), &["templates/old.html", "templates/sub/older.html"]);

        let report = prune_obsolete(
            root.path(),
            &list(&["templates/old.html", "templates/sub/older.html"]),
            fixed_time(),
            |_, _| {},
        )
        .unwrap();

        assert_eq!(report.removed(), 2);
        assert_eq!(report.not_found(), 0);
        assert_eq!(report.failed(), 0);

        // Originals gone, flat copies present with the right bytes.
        assert!(!root.path().join("templates/old.html").exists());
        assert_eq!(
            fs::read(report.backup_dir.join("old.html")).unwrap(),
            b"content of templates/old.html"
        );
        assert_eq!(
            fs::read(report.backup_dir.join("older.html")).unwrap(),
            b"content of templates/sub/older.html"
        );
    }

    #[test]
    fn prune_counts_missing_files_and_continues() {
        let root = TempDir::new().unwrap();
        seed(root.path(), &["templates/old.html"]);

        let report = prune_obsolete(
            root.path(),
            &list(&["templates/gone.html", "templates/old.html"]),
            fixed_time(),
            |_, _| {},
        )
        .unwrap();

        assert_eq!(report.not_found(), 1);
        assert_eq!(report.removed(), 1);
        assert!(!root.path().join("templates/old.html").exists());
    }

    #[test]
    fn prune_isolates_per_file_failures() {
        let root = TempDir::new().unwrap();
        seed(root.path(), &["templates/old.html"]);
        // A directory on the obsolete list: exists, but fs::copy refuses it.
        fs::create_dir_all(root.path().join("templates/oops")).unwrap();

        let report = prune_obsolete(
            root.path(),
            &list(&["templates/oops", "templates/old.html"]),
            fixed_time(),
            |_, _| {},
        )
        .unwrap();

        assert_eq!(report.failed(), 1);
        // The failure did not stop the next file from being processed.
        assert_eq!(report.removed(), 1);
        assert!(root.path().join("templates/oops").exists());
        assert!(!root.path().join("templates/old.html").exists());
    }

    #[test]
    fn prune_creates_the_backup_dir_even_with_empty_list() {
        let root = TempDir::new().unwrap();

        let report = prune_obsolete(root.path(), &[], fixed_time(), |_, _| {}).unwrap();
        assert!(report.backup_dir.is_dir());
        assert_eq!(
            report.backup_dir.file_name().unwrap().to_string_lossy(),
            "backup_templates_20250314_091205"
        );
    }

    #[test]
    fn two_runs_in_the_same_second_get_distinct_backup_dirs() {
        let root = TempDir::new().unwrap();

        let a = prune_obsolete(root.path(), &[], fixed_time(), |_, _| {}).unwrap();
        let b = prune_obsolete(root.path(), &[], fixed_time(), |_, _| {}).unwrap();
        assert_ne!(a.backup_dir, b.backup_dir);
    }

    #[test]
    fn observer_sees_every_file_in_list_order() {
        let root = TempDir::new().unwrap();
        seed(root.path(), &["templates/old.html"]);

        let mut seen = Vec::new();
        prune_obsolete(
            root.path(),
            &list(&["templates/old.html", "templates/gone.html"]),
            fixed_time(),
            |rel, _| seen.push(rel.to_string()),
        )
        .unwrap();

        assert_eq!(seen, vec!["templates/old.html", "templates/gone.html"]);
    }

    #[test]
    fn critical_files_survive_a_full_prune() {
        let root = TempDir::new().unwrap();
        seed(root.path(), &["templates/base.html", "templates/old.html"]);

        prune_obsolete(
            root.path(),
            &list(&["templates/old.html"]),
            fixed_time(),
            |_, _| {},
        )
        .unwrap();

        assert!(root.path().join("templates/base.html").exists());
    }
}
