use crate::cli::ReportFormat;
use crate::config;
use crate::core::time_value::convert_literal;
use crate::formatting::{Formatter, FormattingConfig};
use crate::migrate::{run_migration, FileStatus, MigrationConfig, MigrationReport};
use anyhow::{Context, Result};
use std::fmt::Write;
use std::path::PathBuf;

/// Sample rows printed after a run so the new shape can be eyeballed.
const EXAMPLES: &[(&str, u32)] = &[("19.1", 1), ("19.05", 2), ("16.57", 27)];

#[derive(Debug, Clone)]
pub struct MigrateCommand {
    pub files: Vec<PathBuf>,
    pub config: Option<PathBuf>,
    pub dry_run: bool,
    pub format: ReportFormat,
    pub formatting: FormattingConfig,
}

/// Run the migrate subcommand and return the process exit code.
pub fn handle_migrate(command: MigrateCommand) -> Result<i32> {
    let files = config::resolve_targets(command.files, command.config.as_deref())?;
    let report = run_migration(&MigrationConfig {
        files,
        dry_run: command.dry_run,
    });

    let output = match command.format {
        ReportFormat::Json => {
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        }
        ReportFormat::Terminal => {
            render_terminal(&report, &Formatter::new(command.formatting))
        }
    };
    println!("{}", output);

    Ok(if report.has_failures() { 1 } else { 0 })
}

pub fn render_terminal(report: &MigrationReport, fmt: &Formatter) -> String {
    let mut out = String::new();

    for outcome in &report.outcomes {
        let path = outcome.path.display();
        let line = match &outcome.status {
            FileStatus::Converted { stats } => fmt.success(&format!(
                "{} Processed: {} ({} entries in {} blocks)",
                fmt.ok_mark(),
                path,
                stats.entries_converted,
                stats.blocks_matched
            )),
            FileStatus::WouldConvert { stats } => fmt.warning(&format!(
                "{} Would convert: {} ({} entries in {} blocks)",
                fmt.ok_mark(),
                path,
                stats.entries_converted,
                stats.blocks_matched
            )),
            FileStatus::Unchanged => {
                fmt.dim(&format!("{} Unchanged: {}", fmt.ok_mark(), path))
            }
            FileStatus::Failed { error } => {
                fmt.error(&format!("{} {}", fmt.fail_mark(), error))
            }
        };
        let _ = writeln!(out, "{}", line);
    }

    let failures = report.failures().count();
    let summary = if failures == 0 {
        fmt.success(&format!("{} Conversion complete!", fmt.ok_mark()))
    } else {
        fmt.error(&format!(
            "{} Conversion finished with {} failed file(s)",
            fmt.fail_mark(),
            failures
        ))
    };
    let _ = writeln!(out, "\n{}", summary);

    let _ = writeln!(out, "\n{}", fmt.header("Example conversions:"));
    for (value, points) in EXAMPLES {
        if let Ok(time) = convert_literal(value) {
            let _ = writeln!(
                out,
                "{:<5} -> {{ value: {}, points: {} }}",
                value, time, points
            );
        }
    }

    out.trim_end().to_string()
}
