//! Config Command
//!
//! Usage:
//!   gymlog config show [-f json]
//!   gymlog config path
//!   gymlog config init [--force]

use std::path::Path;

use crate::cli::ui::Output;
use crate::config::{ConfigLoader, ENV_PREFIX};
use crate::types::Result;

/// Print the effective configuration (defaults, file, environment).
pub fn show(config_file: Option<&Path>, format: &str) -> Result<()> {
    let config = ConfigLoader::load_with(config_file)?;
    println!("{}", ConfigLoader::render(&config, format == "json")?);
    Ok(())
}

/// Print where configuration is read from.
pub fn path(config_file: Option<&Path>) -> Result<()> {
    let file = config_file
        .map(Path::to_path_buf)
        .or_else(ConfigLoader::global_config_path);
    match file {
        Some(file) => {
            let state = if file.exists() { "" } else { " (not created)" };
            println!("Config:  {}{}", file.display(), state);
        }
        None => println!("Config:  cannot determine config directory"),
    }

    let config = ConfigLoader::load_with(config_file)?;
    println!("Store:   {}", config.store.path.display());
    println!("Env:     {}*", ENV_PREFIX);
    Ok(())
}

/// Write the default global config file.
pub fn init(force: bool) -> Result<()> {
    let path = ConfigLoader::init_global(force)?;
    Output::new().success(&format!("Config: {}", path.display()));
    Ok(())
}
