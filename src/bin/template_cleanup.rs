//! `template-cleanup` — remove obsolete dossier templates, safely.
//!
//! A single run, no subcommands:
//!
//! 1. Verify every critical template exists.  Any miss cancels the run
//!    before a single file is touched.
//! 2. Create a fresh `backup_templates_<stamp>` directory, copy each
//!    obsolete template into it, delete the original.  Per-file errors are
//!    reported and skipped.
//! 3. Print the removed / not-found / failed counts and the backup location.
//!
//! The file lists come from `maint.toml` (`[templates]`); see
//! [`dossier_maint::config`].

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use console::style;

use dossier_maint::config::{Config, load_config};
use dossier_maint::pruner;
use dossier_maint::ui;

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(
    name    = "template-cleanup",
    about   = "Back up and delete obsolete dossier templates",
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
    /// config file the stock template lists are used.
    #[arg(short, long, default_value = "maint.toml")]
    pub config: PathBuf,

    /// Print the parsed configuration and exit without running anything.
    #[arg(long)]
    pub print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = load_config(&cli.config)?;

    if cli.print_config {
        println!("{cfg:#?}");
        return Ok(());
    }

    run(&cfg, Path::new("."))
}

/// The whole verify-then-prune-or-cancel run.
fn run(cfg: &Config, root: &Path) -> Result<()> {
    ui::banner("Template cleanup");

    // 1. Gate on the critical list.
    println!();
    println!("{}", style("Checking critical templates").bold());
    let status = pruner::verify_critical(root, &cfg.templates.critical);
    for (path, present) in &status.files {
        if *present {
            println!("  {}  {path}", ui::icon_ok());
        } else {
            println!("  {}  MISSING {path}", ui::icon_err());
        }
    }

    if !status.all_present() {
        println!();
        eprintln!(
            "  {}  {}",
            ui::icon_err(),
            style(format!(
                "cleanup cancelled: {} critical template(s) missing",
                status.missing().len()
            ))
            .red()
            .bold()
        );
        std::process::exit(1);
    }

    // 2. Prune, narrating each file above the progress bar.
    println!();
    println!("{}", style("Removing obsolete templates").bold());
    let pb = ui::file_progress(cfg.templates.obsolete.len() as u64);
    let report = pruner::prune_obsolete(
        root,
        &cfg.templates.obsolete,
        Local::now(),
        |rel, outcome| {
            pb.println(ui::outcome_line(rel, outcome));
            pb.inc(1);
        },
    )?;
    pb.finish_and_clear();

    // 3. Summary.
    ui::print_cleanup_summary(&report);
    Ok(())
}
