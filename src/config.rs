//! Configuration types and loading logic.
//!
//! `Config` is a direct 1-to-1 mapping of `maint.toml`.  Every field has a
//! `Default` impl so the file is entirely optional — running either binary
//! without a config file falls back to the stock dossier-system layout
//! (`dossie_system.db` next to a `backups/` directory, and the standard
//! template lists).
//!
//! # File format
//!
//! ```toml
//! [database]
//! file       = "dossie_system.db"  # the live database file
//! backup_dir = "backups"           # where timestamped copies go
//! keep       = 10                  # retained backup count
//!
//! [templates]
//! obsolete = ["templates/index.html", "templates/login.html"]
//! critical = ["templates/base.html", "templates/dashboard_novo.html"]
//! ```
//!
//! The template lists were once hardcoded in the cleanup script itself;
//! keeping them in the config means a test run can point at fixture lists
//! instead of the real template tree.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ─── Top-level ────────────────────────────────────────────────────────────────

/// Root configuration object, deserialised from `maint.toml`.
///
/// Both sections are optional; missing sections fall back to their
/// `Default` implementations.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    /// Database file and backup retention settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Template lists for the cleanup run.
    #[serde(default)]
    pub templates: TemplatesConfig,
}

// ─── [database] ───────────────────────────────────────────────────────────────

/// Where the live database lives and how its backups are retained.
#[derive(Debug, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the live database file, relative to the working directory.
    #[serde(default = "default_db_file")]
    pub file: PathBuf,

    /// Directory that holds the timestamped backup copies.
    ///
    /// Created automatically on the first `db-backup create`.
    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,

    /// How many backups to retain.
    ///
    /// After every create, the oldest entries beyond this count are deleted.
    /// Safety snapshots taken before a restore count against the same limit.
    #[serde(default = "default_keep")]
    pub keep: usize,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            file: default_db_file(),
            backup_dir: default_backup_dir(),
            keep: default_keep(),
        }
    }
}

// ─── [templates] ──────────────────────────────────────────────────────────────

/// The two template lists driving `template-cleanup`.
///
/// `obsolete` entries are backed up and deleted; `critical` entries gate the
/// run — if any of them is missing the cleanup is cancelled before touching
/// anything.
#[derive(Debug, Deserialize, Serialize)]
pub struct TemplatesConfig {
    /// Relative paths slated for removal.
    #[serde(default = "default_obsolete")]
    pub obsolete: Vec<String>,

    /// Relative paths that must all exist for the cleanup to proceed.
    #[serde(default = "default_critical")]
    pub critical: Vec<String>,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            obsolete: default_obsolete(),
            critical: default_critical(),
        }
    }
}

// ─── Defaults ─────────────────────────────────────────────────────────────────

// These free functions are required by `#[serde(default = "…")]` — serde
// cannot call `Default::default()` for individual fields, only for whole
// structs.

pub fn default_db_file() -> PathBuf {
    PathBuf::from("dossie_system.db")
}

pub fn default_backup_dir() -> PathBuf {
    PathBuf::from("backups")
}

pub fn default_keep() -> usize {
    10
}

/// Templates superseded by the modular rewrite of the dossier UI.
pub fn default_obsolete() -> Vec<String> {
    [
        "templates/dashboard.html",
        "templates/dashboard_completo.html",
        "templates/index.html",
        "templates/index_completo.html",
        "templates/index_modular.html",
        "templates/login.html",
        "templates/login_completo.html",
        "templates/login_modular.html",
        "templates/escolas/listar_simples.html",
        "templates/escolas/nova_simples.html",
    ]
    .map(String::from)
    .to_vec()
}

/// Templates the running application renders today.
pub fn default_critical() -> Vec<String> {
    [
        "templates/base.html",
        "templates/dashboard_novo.html",
        "templates/auth/login_novo.html",
        "templates/errors/404.html",
        "templates/errors/500.html",
        "templates/usuarios/perfil.html",
        "templates/admin/configuracoes/index.html",
    ]
    .map(String::from)
    .to_vec()
}

// ─── Loader ───────────────────────────────────────────────────────────────────

/// Read and parse a `Config` from `path`.
///
/// If the file does not exist, a warning is printed to `stderr` and a
/// fully-defaulted `Config` is returned, so both binaries can run in a stock
/// checkout without any config file.
///
/// Returns an error if the file exists but cannot be read or is not valid
/// TOML.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        eprintln!(
            "Warning: config file '{}' not found, using defaults.",
            path.display()
        );
        return Ok(Config::default());
    }

    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Defaults ─────────────────────────────────────────────────────────────

    #[test]
    fn default_config_matches_stock_layout() {
        let cfg = Config::default();
        assert_eq!(cfg.database.file, PathBuf::from("dossie_system.db"));
        assert_eq!(cfg.database.backup_dir, PathBuf::from("backups"));
        assert_eq!(cfg.database.keep, 10);
    }

    #[test]
    fn default_lists_are_disjoint() {
        // A file must never be both obsolete and critical; that would make the
        // cleanup delete something the gate just verified.
        let t = TemplatesConfig::default();
        for path in &t.obsolete {
            assert!(
                !t.critical.contains(path),
                "'{path}' appears in both template lists"
            );
        }
    }

    #[test]
    fn default_critical_list_is_nonempty() {
        assert!(!default_critical().is_empty());
    }

    // ── Round-trip serialisation ──────────────────────────────────────────────

    #[test]
    fn config_roundtrips_through_toml() {
        let original = Config {
            database: DatabaseConfig {
                file: "app.db".into(),
                backup_dir: "snapshots".into(),
                keep: 3,
            },
            templates: TemplatesConfig {
                obsolete: vec!["old/a.html".into(), "old/b.html".into()],
                critical: vec!["live/base.html".into()],
            },
        };

        let toml_str = toml::to_string(&original).expect("serialisation failed");
        let recovered: Config = toml::from_str(&toml_str).expect("deserialisation failed");

        assert_eq!(recovered.database.file, original.database.file);
        assert_eq!(recovered.database.backup_dir, original.database.backup_dir);
        assert_eq!(recovered.database.keep, original.database.keep);
        assert_eq!(recovered.templates.obsolete, original.templates.obsolete);
        assert_eq!(recovered.templates.critical, original.templates.critical);
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_fields() {
        // A config with only [database].keep should fill everything else in.
        let toml_str = r#"
            [database]
            keep = 5
        "#;
        let cfg: Config = toml::from_str(toml_str).expect("parse failed");
        assert_eq!(cfg.database.keep, 5);
        assert_eq!(cfg.database.file, default_db_file());
        assert_eq!(cfg.templates.critical, default_critical());
    }

    #[test]
    fn empty_toml_deserialises_to_defaults() {
        let cfg: Config = toml::from_str("").expect("empty toml should parse");
        assert_eq!(cfg.database.keep, 10);
    }

    // ── load_config ───────────────────────────────────────────────────────────

    #[test]
    fn load_config_returns_defaults_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(!path.exists(), "test precondition: file must not exist");

        let cfg = load_config(&path).expect("should not error on missing file");
        assert_eq!(cfg.database.file, default_db_file());
    }

    #[test]
    fn load_config_parses_valid_file() {
        use std::io::Write;
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            r#"
            [database]
            file       = "other.db"
            backup_dir = "bk"
            "#
        )
        .unwrap();

        let cfg = load_config(f.path()).expect("should parse valid toml");
        assert_eq!(cfg.database.file, PathBuf::from("other.db"));
        assert_eq!(cfg.database.backup_dir, PathBuf::from("bk"));
        assert_eq!(cfg.database.keep, 10);
    }

    #[test]
    fn load_config_errors_on_invalid_toml() {
        use std::io::Write;
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "not valid toml ][[[").unwrap();

        let result = load_config(f.path());
        assert!(result.is_err(), "invalid TOML should produce an error");
    }
}
