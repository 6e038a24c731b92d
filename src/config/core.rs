use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name searched for in the working directory and its ancestors.
pub const CONFIG_FILE_NAME: &str = ".mptime.toml";

/// Root configuration structure for mptime.
///
/// The file only ever lists the target paths; everything else about a run
/// comes from the command line.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MptimeConfig {
    /// Files to migrate, in processing order
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

impl MptimeConfig {
    /// Anchor relative entries at `base`, the directory holding the config
    /// file, so a run behaves the same from any working directory.
    pub fn resolve_relative_to(self, base: &Path) -> Self {
        let files = self
            .files
            .into_iter()
            .map(|file| {
                if file.is_absolute() {
                    file
                } else {
                    base.join(file)
                }
            })
            .collect();
        Self { files }
    }
}
