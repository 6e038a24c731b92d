use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::{Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# mptime configuration
#
# Files to migrate, in order. Relative paths are resolved against the
# directory holding this file.
files = [
    "src/data/exercises-female.ts",
    "src/data/exercises-male.ts",
]
"#;

/// Write a starter config into `dir`, returning its path.
pub fn init_config(dir: &Path, force: bool) -> Result<std::path::PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    io::write_file_atomic(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(config_path)
}
