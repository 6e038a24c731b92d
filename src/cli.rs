use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable per-file lines
    Terminal,
    /// Machine-readable report on stdout
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "mptime")]
#[command(
    about = "Migrate decimal perc:mp times to { minutes, seconds } records",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrite legacy time values in place
    Migrate {
        /// Files to migrate (overrides the config file's list)
        files: Vec<PathBuf>,

        /// Configuration file listing the target files
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Show what would change without writing
        #[arg(long = "dry-run")]
        dry_run: bool,

        /// Report format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: ReportFormat,

        /// Plain output: no colors, ASCII status marks
        #[arg(long)]
        plain: bool,
    },

    /// Convert legacy literals and print the structured form
    Convert {
        /// Legacy values such as 19.1 or 16.57
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Create a starter .mptime.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_migrate_with_files() {
        let cli = Cli::parse_from(["mptime", "-vv", "migrate", "--dry-run", "a.ts", "b.ts"]);
        assert_eq!(cli.verbosity, 2);
        match cli.command {
            Commands::Migrate {
                files,
                dry_run,
                format,
                ..
            } => {
                assert_eq!(files, vec![PathBuf::from("a.ts"), PathBuf::from("b.ts")]);
                assert!(dry_run);
                assert_eq!(format, ReportFormat::Terminal);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_convert_requires_a_value() {
        assert!(Cli::try_parse_from(["mptime", "convert"]).is_err());
    }
}
