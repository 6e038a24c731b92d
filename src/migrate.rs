//! Per-file migration driver.
//!
//! Files are processed strictly in the order given. Each one is read whole,
//! rewritten in memory and only then written back, so a failure at any step
//! leaves that file exactly as it was. A failing file is recorded in the
//! report and the run moves on to the next one.

use crate::core::errors::{MigrateError, Result};
use crate::core::rewriter::{rewrite, RewriteStats};
use crate::io;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Everything a run needs; passed explicitly rather than read from globals.
#[derive(Debug, Clone, Default)]
pub struct MigrationConfig {
    pub files: Vec<PathBuf>,
    /// Report what would change without writing anything
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Converted { stats: RewriteStats },
    WouldConvert { stats: RewriteStats },
    /// Nothing qualified; the file was not rewritten
    Unchanged,
    Failed { error: MigrateError },
}

#[derive(Debug, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: FileStatus,
}

impl FileOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, FileStatus::Failed { .. })
    }
}

#[derive(Debug, Default, Serialize)]
pub struct MigrationReport {
    pub dry_run: bool,
    pub outcomes: Vec<FileOutcome>,
}

impl MigrationReport {
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Entries converted (or that would be, in a dry run) across all files.
    pub fn total_entries(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match &o.status {
                FileStatus::Converted { stats } | FileStatus::WouldConvert { stats } => {
                    stats.entries_converted
                }
                FileStatus::Unchanged | FileStatus::Failed { .. } => 0,
            })
            .sum()
    }
}

/// Migrate a single file, all or nothing.
pub fn migrate_file(path: &Path, dry_run: bool) -> Result<FileStatus> {
    let source = io::read_file(path)?;
    let rewritten = rewrite(&source).map_err(|e| MigrateError::conversion(path, e))?;

    if !rewritten.changed() {
        log::info!("{}: no legacy entries found", path.display());
        return Ok(FileStatus::Unchanged);
    }

    let stats = rewritten.stats;
    if dry_run {
        log::info!(
            "{}: would convert {} entries (dry run)",
            path.display(),
            stats.entries_converted
        );
        return Ok(FileStatus::WouldConvert { stats });
    }

    io::write_file_atomic(path, &rewritten.text)?;
    log::info!(
        "{}: converted {} entries in {} blocks",
        path.display(),
        stats.entries_converted,
        stats.blocks_matched
    );
    Ok(FileStatus::Converted { stats })
}

/// Run the migration over every configured file.
pub fn run_migration(config: &MigrationConfig) -> MigrationReport {
    let outcomes = config
        .files
        .iter()
        .map(|path| {
            log::debug!("Processing {}", path.display());
            let status = migrate_file(path, config.dry_run).unwrap_or_else(|error| {
                log::debug!("{}", error);
                FileStatus::Failed { error }
            });
            FileOutcome {
                path: path.clone(),
                status,
            }
        })
        .collect();

    MigrationReport {
        dry_run: config.dry_run,
        outcomes,
    }
}
