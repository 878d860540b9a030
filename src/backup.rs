//! Database backup operations — create, list, restore, prune.
//!
//! A backup is a plain byte-for-byte copy of the live database file, named
//! `backup_<YYYYMMDD_HHMMSS><ext>` inside the configured backup directory.
//! The fixed-width stamp makes lexicographic filename order equal
//! chronological order, so retention is just "sort, drop the head".
//!
//! Safety snapshots taken before a restore are named
//! `backup_before_restore_<stamp><ext>`.  They share the `backup_` prefix and
//! therefore live in the same retention set; because `b` sorts after any
//! digit they count as the newest members and are the last to be pruned.
//!
//! Nothing here prints.  Every operation returns plain data (or a
//! [`BackupError`]) and the `db-backup` binary renders it.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::config::DatabaseConfig;
use crate::stamp;

/// Filename prefix shared by every retention-set member.
pub const BACKUP_PREFIX: &str = "backup_";

/// Filename stem of a pre-restore safety snapshot (stamp appended).
pub const SNAPSHOT_STEM: &str = "backup_before_restore";

// ─── Errors ───────────────────────────────────────────────────────────────────

/// Failure modes of the backup operations.
///
/// The two "missing" variants are expected operator-facing conditions; `Io`
/// wraps anything the filesystem throws at us.
#[derive(Debug, Error)]
pub enum BackupError {
    /// The live database file was not found, so there is nothing to back up.
    #[error("database file '{0}' not found")]
    MissingDataFile(PathBuf),

    /// The named backup does not exist in the backup directory.
    #[error("backup '{0}' not found")]
    MissingBackup(String),

    /// An underlying copy/read/delete failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ─── Types ────────────────────────────────────────────────────────────────────

/// One member of the retention set.
#[derive(Debug, Clone)]
pub struct BackupEntry {
    /// Bare filename, e.g. `backup_20250314_091205.db`.
    pub name: String,
    /// Full path inside the backup directory.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Filesystem modification time.
    pub modified: DateTime<Local>,
}

/// What a successful create did.
#[derive(Debug)]
pub struct CreateOutcome {
    /// Path of the freshly written backup.
    pub backup_path: PathBuf,
    /// Names of the old entries deleted to enforce the retention limit,
    /// oldest first.  Empty when the set was still under the limit.
    pub pruned: Vec<String>,
}

/// What a successful restore did.
#[derive(Debug)]
pub struct RestoreOutcome {
    /// Name of the backup that now backs the live file.
    pub restored_from: String,
    /// Name of the safety snapshot taken of the previous live file, or
    /// `None` when no live file existed.
    pub safety_snapshot: Option<String>,
}

// ─── Operations ───────────────────────────────────────────────────────────────

/// Copy the live database file into the backup directory, then prune.
///
/// Fails with [`BackupError::MissingDataFile`] when the live file is absent.
/// The backup directory is created on first use.  `now` is passed in so the
/// minted name is under the caller's control (and testable).
pub fn create_backup(
    cfg: &DatabaseConfig,
    now: DateTime<Local>,
) -> Result<CreateOutcome, BackupError> {
    if !cfg.file.exists() {
        return Err(BackupError::MissingDataFile(cfg.file.clone()));
    }

    fs::create_dir_all(&cfg.backup_dir)?;

    let stem = format!("{BACKUP_PREFIX}{}", stamp::timestamp(now));
    let dest = stamp::unique_path(&cfg.backup_dir, &stem, &data_ext(cfg));
    fs::copy(&cfg.file, &dest)?;

    let pruned = prune_old(cfg)?;

    Ok(CreateOutcome {
        backup_path: dest,
        pruned,
    })
}

/// Return the retention set, oldest first.
///
/// An absent backup directory — or one with no `backup_`-prefixed files —
/// yields an empty `Vec`, not an error.
pub fn list_backups(cfg: &DatabaseConfig) -> Result<Vec<BackupEntry>, BackupError> {
    if !cfg.backup_dir.exists() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(&cfg.backup_dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with(BACKUP_PREFIX) || !entry.path().is_file() {
            continue;
        }
        let md = entry.metadata()?;
        entries.push(BackupEntry {
            name,
            path: entry.path(),
            size: md.len(),
            modified: DateTime::from(md.modified()?),
        });
    }

    // Fixed-width stamps: name order == age order.
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Overwrite the live database file with the named backup.
///
/// If a live file exists it is first copied aside as a safety snapshot so
/// the pre-restore contents survive inside the retention set.  The snapshot
/// is *not* pruned here; the next create will account for it.
///
/// Fails with [`BackupError::MissingBackup`] — leaving the live file
/// untouched — when `name` is not present in the backup directory.
pub fn restore_backup(
    cfg: &DatabaseConfig,
    name: &str,
    now: DateTime<Local>,
) -> Result<RestoreOutcome, BackupError> {
    let backup_path = cfg.backup_dir.join(name);
    if !backup_path.exists() {
        return Err(BackupError::MissingBackup(name.to_string()));
    }

    let safety_snapshot = if cfg.file.exists() {
        let stem = format!("{SNAPSHOT_STEM}_{}", stamp::timestamp(now));
        let snap = stamp::unique_path(&cfg.backup_dir, &stem, &data_ext(cfg));
        fs::copy(&cfg.file, &snap)?;
        snap.file_name()
            .map(|n| n.to_string_lossy().into_owned())
    } else {
        None
    };

    fs::copy(&backup_path, &cfg.file)?;

    Ok(RestoreOutcome {
        restored_from: name.to_string(),
        safety_snapshot,
    })
}

/// Delete the oldest entries until at most `cfg.keep` remain.
///
/// Returns the deleted names, oldest first.
fn prune_old(cfg: &DatabaseConfig) -> Result<Vec<String>, BackupError> {
    let entries = list_backups(cfg)?;
    if entries.len() <= cfg.keep {
        return Ok(Vec::new());
    }

    let excess = entries.len() - cfg.keep;
    let mut pruned = Vec::with_capacity(excess);
    for entry in &entries[..excess] {
        fs::remove_file(&entry.path)?;
        pruned.push(entry.name.clone());
    }
    Ok(pruned)
}

/// Extension (with leading dot) of the live database file, e.g. `".db"`.
fn data_ext(cfg: &DatabaseConfig) -> String {
    cfg.file
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}

// ─── Tests ────────────────────────────────────────────────────────────────────
