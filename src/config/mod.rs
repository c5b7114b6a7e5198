mod settings;

use std::path::Path;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{ConnectionSettings, LoggingSettings, PollSettings, Settings};

/// Prefix for environment overrides, e.g. `SMOKELINK_CONNECTION__ADDRESS`.
pub const ENV_PREFIX: &str = "SMOKELINK";

/// Loads the configuration from the default file and environment variables
/// Merges the configuration with default values
/// Returns a `Settings` struct containing the connection, poll and logging configurations
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from("config/default")
}

/// Same as [`load_config`] but reads the optional file at `path` (extension
/// is resolved by the `config` crate, so `config/default` matches
/// `config/default.toml`).
pub fn load_config_from(path: impl AsRef<Path>) -> Result<Settings, ConfigError> {
    // a missing .env is the normal case
    let _ = dotenvy::dotenv();

    let name = path.as_ref().to_string_lossy().into_owned();
    let builder = Config::builder()
        .add_source(File::with_name(&name).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    Ok(partial.merge(Settings::default()))
}

#[cfg(test)]
mod tests;
