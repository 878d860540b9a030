//! `db-backup` — timestamped copies of the dossier database file.
//!
//! # Usage
//!
//! ```text
//! db-backup create             # copy the database into backups/, prune old ones
//! db-backup list               # show retained backups, oldest first
//! db-backup restore <name>     # restore a backup (snapshots the live file first)
//! db-backup restore            # no name: list backups and show the usage hint
//! ```
//!
//! All behaviour lives in [`dossier_maint::backup`]; this binary parses
//! arguments, loads `maint.toml`, and renders the returned outcomes.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::{CommandFactory, Parser};

use dossier_maint::backup::{self, BackupEntry, BackupError};
use dossier_maint::config::{Config, load_config};
use dossier_maint::ui;

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(
    name    = "db-backup",
    about   = "Create, list, and restore dossier database backups",
    version,
    // Show a compact two-column help layout.
    help_template = "\
{before-help}{name} {version}
{about}

{usage-heading} {usage}

{all-args}{after-help}"
)]
pub struct Cli {
    /// Path to the configuration file.
    ///
    /// Defaults to `maint.toml` in the current working directory.  Without a
    /// config file the stock layout is assumed (`dossie_system.db`,
    /// `backups/`, keep 10).
    #[arg(short, long, default_value = "maint.toml")]
    pub config: PathBuf,

    /// Subcommand to run.  Omit to print usage.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Print the parsed configuration and exit without running anything.
    #[arg(long)]
    pub print_config: bool,
}

/// The three backup operations.
#[derive(clap::Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Copy the database file into the backup directory and prune old backups.
    Create,

    /// List retained backups, oldest first, with size and modification time.
    List,

    /// Overwrite the database file with the named backup.
    ///
    /// The current database file is snapshotted into the backup directory
    /// first, so the pre-restore contents are never lost.  Without NAME the
    /// available backups are listed instead.
    Restore {
        /// Backup filename as shown by `db-backup list`.
        name: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = load_config(&cli.config)?;

    if cli.print_config {
        println!("{cfg:#?}");
        return Ok(());
    }

    match &cli.command {
        Some(Command::Create) => create(&cfg),
        Some(Command::List) => list(&cfg).map(|_| ()),
        Some(Command::Restore { name }) => restore(&cfg, name.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        },
    }
}

// ─── Subcommand handlers ──────────────────────────────────────────────────────

fn create(cfg: &Config) -> Result<()> {
    let out = match backup::create_backup(&cfg.database, Local::now()) {
        Ok(out) => out,
        Err(e) => fail(e),
    };

    println!(
        "  {}  backup created: {}",
        ui::icon_ok(),
        out.backup_path.display()
    );
    for name in &out.pruned {
        println!("  {}  pruned old backup: {name}", ui::icon_info());
    }
    Ok(())
}

fn list(cfg: &Config) -> Result<Vec<BackupEntry>> {
    let entries = match backup::list_backups(&cfg.database) {
        Ok(entries) => entries,
        Err(e) => fail(e),
    };

    if entries.is_empty() {
        println!(
            "  {}  no backups found in '{}'",
            ui::icon_info(),
            cfg.database.backup_dir.display()
        );
        return Ok(entries);
    }

    ui::banner("Available backups");
    for (i, entry) in entries.iter().enumerate() {
        println!("{}", ui::backup_line(i + 1, entry));
    }
    Ok(entries)
}

fn restore(cfg: &Config, name: Option<&str>) -> Result<()> {
    // No name given: show what is available and how to pick one, restore
    // nothing.
    let Some(name) = name else {
        let entries = list(cfg)?;
        if !entries.is_empty() {
            println!();
            println!("  Use: db-backup restore <name>");
        }
        return Ok(());
    };

    let out = match backup::restore_backup(&cfg.database, name, Local::now()) {
        Ok(out) => out,
        Err(e) => fail(e),
    };

    if let Some(snap) = &out.safety_snapshot {
        println!(
            "  {}  current database snapshotted as: {snap}",
            ui::icon_info()
        );
    }
    println!("  {}  restored from: {}", ui::icon_ok(), out.restored_from);
    Ok(())
}

/// Print the operation error on one styled line and exit non-zero.
///
/// Missing-file conditions are expected operator mistakes, not crashes; they
/// get the same one-line treatment as any other status.
fn fail(e: BackupError) -> ! {
    eprintln!("  {}  {e}", ui::icon_err());
    std::process::exit(1);
}
