//! Conversion core: the legacy time decoder and the block rewriter.

pub mod errors;
pub mod rewriter;
pub mod time_value;

pub use errors::{ConversionError, MigrateError};
pub use rewriter::{rewrite, Rewrite, RewriteStats, MARKER};
pub use time_value::{convert, convert_literal, LegacyTime, StructuredTime};
