use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Account, Config, Journal, Stats};

/// Loads the application configuration from the `config.toml` file.
///
/// Every section is optional: a missing file or missing keys fall back to
/// the documented defaults, so the binary runs without any configuration at
/// all.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`
        .add_source(config::File::with_name("config.toml").required(false))
        // Environment variables win over the file, e.g. DAYBOOK_JOURNAL__PATH.
        .add_source(config::Environment::with_prefix("DAYBOOK").separator("__"))
        .build()?;

    let config = builder.try_deserialize::<Config>()?;

    Ok(config)
}
