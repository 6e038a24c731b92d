// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod formatting;
pub mod io;
pub mod migrate;

// Re-export commonly used types
pub use crate::core::{
    convert, convert_literal, rewrite, ConversionError, LegacyTime, MigrateError, Rewrite,
    RewriteStats, StructuredTime, MARKER,
};

pub use crate::migrate::{
    migrate_file, run_migration, FileOutcome, FileStatus, MigrationConfig, MigrationReport,
};
