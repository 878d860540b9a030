//! Terminal UI — icons, banners, progress bar, and report rendering.
//!
//! # Design goals
//!
//! - **Presentation only.** The operations in [`crate::backup`] and
//!   [`crate::pruner`] return plain data; everything the operator sees on
//!   screen is produced here or in the binaries.  Swapping the narration out
//!   never changes behaviour.
//! - **Scannable.** One line per file or backup, a ✓/✗/ℹ icon up front, the
//!   same shape every run.
//!
//! The rendering functions return `String`s rather than printing directly so
//! unit tests can assert on the exact lines without capturing stdout.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::backup::BackupEntry;
use crate::pruner::{CleanupReport, FileOutcome};
use crate::stamp;

// ─── Icons ───────────────────────────────────────────────────────────────────

/// Green ✓  — a file is present / an operation succeeded.
pub fn icon_ok() -> console::StyledObject<&'static str> {
    style("✓").green().bold()
}
/// Red ✗    — a file is missing / an operation failed.
pub fn icon_err() -> console::StyledObject<&'static str> {
    style("✗").red().bold()
}
/// Dim ℹ    — informational, e.g. an obsolete file that was already gone.
pub fn icon_info() -> console::StyledObject<&'static str> {
    style("ℹ").dim()
}

// ─── Banners ──────────────────────────────────────────────────────────────────

/// Print a section banner: the title in bold over a dim rule of equal width.
pub fn banner(title: &str) {
    println!("{}", style(title).bold());
    println!("{}", style("─".repeat(title.chars().count())).dim());
}

// ─── Progress bar ─────────────────────────────────────────────────────────────

/// A bar sized for `len` files, used while the pruner walks the obsolete list.
///
/// Per-file status lines are emitted through [`ProgressBar::println`] so they
/// appear above the bar instead of tearing it.
pub fn file_progress(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("  {bar:24.cyan/blue} {pos}/{len} {msg}")
            .unwrap(),
    );
    pb
}

// ─── Renderers ────────────────────────────────────────────────────────────────

/// One listing line: `  3. backup_20250314_091205.db (2048 bytes) - 14/03/2025 09:12:05`.
pub fn backup_line(index: usize, entry: &BackupEntry) -> String {
    format!(
        "  {index}. {} ({} bytes) - {}",
        entry.name,
        entry.size,
        stamp::display_time(entry.modified)
    )
}

/// One per-file line of the cleanup run.
pub fn outcome_line(rel: &str, outcome: &FileOutcome) -> String {
    match outcome {
        FileOutcome::Removed { .. } => format!("  {}  removed {rel}", icon_ok()),
        FileOutcome::NotFound => format!("  {}  not found {rel}", icon_info()),
        FileOutcome::Failed(reason) => {
            format!("  {}  {rel}: {reason}", icon_err())
        },
    }
}

/// Print the closing summary of a cleanup run.
pub fn print_cleanup_summary(report: &CleanupReport) {
    println!();
    println!("{}", style("Result").bold());
    println!("  removed:   {}", report.removed());
    println!("  not found: {}", report.not_found());
    if report.failed() > 0 {
        println!(
            "  {} {}",
            style("failed:").red().bold(),
            style(report.failed()).red().bold()
        );
    }
    println!("  backup:    {}", report.backup_dir.display());
}

// ─── Tests ────────────────────────────────────────────────────────────────────
