use gatesync_domain::{CliOverrides, Config};

/// Loads the configuration file (if any) and applies command-line and
/// environment overrides. Each command validates what it needs.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    Ok(config)
}
