mod core;
mod loader;

pub use self::core::{MptimeConfig, CONFIG_FILE_NAME};
pub use self::loader::{
    directory_ancestors, discover_config, load_config_from, parse_and_validate_config,
    resolve_targets, resolve_targets_from, LoadedConfig,
};
