use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::{MptimeConfig, CONFIG_FILE_NAME};
use crate::core::MigrateError;

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// A parsed config file together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub config: MptimeConfig,
}

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<MptimeConfig, String> {
    toml::from_str::<MptimeConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
}

fn anchor(path: &Path, config: MptimeConfig) -> LoadedConfig {
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    LoadedConfig {
        path: path.to_path_buf(),
        config: config.resolve_relative_to(base),
    }
}

/// Load a config file the user named explicitly. Any failure is an error.
pub fn load_config_from(path: &Path) -> Result<LoadedConfig, MigrateError> {
    let contents = read_config_file(path).map_err(|e| {
        MigrateError::config_with_path(format!("Failed to read config: {}", e), path)
    })?;
    let config = parse_and_validate_config(&contents)
        .map_err(|message| MigrateError::config_with_path(message, path))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(anchor(path, config))
}

/// Pure function to try loading a discovered config from a specific path
fn try_load_config_from_path(config_path: &Path) -> Option<LoadedConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(anchor(config_path, config))
        }
        Err(e) => {
            log::warn!("{}. Ignoring {}.", e, config_path.display());
            None
        }
    }
}

/// Handle file read errors with appropriate logging
fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for a config file.
pub fn discover_config(start: &Path) -> Option<LoadedConfig> {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .or_else(|| {
            log::debug!(
                "No {} found after checking {} directories",
                CONFIG_FILE_NAME,
                MAX_TRAVERSAL_DEPTH
            );
            None
        })
}

/// Decide which files a run touches.
///
/// Paths given on the command line win. Otherwise the explicit config file is
/// used, or failing that the nearest discovered one.
pub fn resolve_targets_from(
    cli_files: Vec<PathBuf>,
    explicit_config: Option<&Path>,
    cwd: &Path,
) -> Result<Vec<PathBuf>, MigrateError> {
    if !cli_files.is_empty() {
        log::debug!("Using {} target(s) from the command line", cli_files.len());
        return Ok(cli_files);
    }

    let loaded = match explicit_config {
        Some(path) => Some(load_config_from(path)?),
        None => discover_config(cwd),
    };

    match loaded {
        Some(LoadedConfig { path, config }) if config.files.is_empty() => Err(
            MigrateError::config_with_path("no target files listed", path),
        ),
        Some(LoadedConfig { config, .. }) => Ok(config.files),
        None => Err(MigrateError::config(format!(
            "no target files given and no {} found",
            CONFIG_FILE_NAME
        ))),
    }
}

/// [`resolve_targets_from`] anchored at the process working directory.
pub fn resolve_targets(
    cli_files: Vec<PathBuf>,
    explicit_config: Option<&Path>,
) -> Result<Vec<PathBuf>, MigrateError> {
    let cwd = std::env::current_dir().map_err(|e| {
        MigrateError::config(format!("Failed to get current directory: {}", e))
    })?;
    resolve_targets_from(cli_files, explicit_config, &cwd)
}
