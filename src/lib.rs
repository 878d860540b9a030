//! `dossier-maint` — maintenance utilities for the dossier system's data layer.
//!
//! # Overview
//!
//! This crate replaces a pair of hand-maintained admin scripts with two small,
//! config-driven binaries:
//!
//! - `db-backup` — timestamped file-copy backups and restores of the single
//!   database file, keeping only the most recent few.
//! - `template-cleanup` — backs up and deletes a configured list of obsolete
//!   template files, but only after verifying that every critical template is
//!   still in place.
//!
//! # Usage
//!
//! ```text
//! db-backup create             # snapshot the database file into backups/
//! db-backup list               # show retained backups, oldest first
//! db-backup restore <name>     # restore a backup (snapshots the live file first)
//! template-cleanup             # verify critical templates, then prune obsolete ones
//! ```
//!
//! # Module layout
//!
//! | Module     | Responsibility                                   |
//! |------------|--------------------------------------------------|
//! | [`config`] | `Config` struct + TOML loader                    |
//! | [`stamp`]  | Timestamp names and collision-free paths         |
//! | [`backup`] | Create / list / restore / prune database backups |
//! | [`pruner`] | Critical-file check and obsolete-file removal    |
//! | [`ui`]     | Icons, banners, progress bar, report rendering   |

pub mod backup;
pub mod config;
pub mod pruner;
pub mod stamp;
pub mod ui;
