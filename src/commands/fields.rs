use anyhow::Result;
use colored::Colorize;

use crate::core::telemetry::FieldKey;
use crate::core::Config;

/// List every field key and whether the config disables it.
pub fn execute() -> Result<()> {
    let config = Config::load()?;

    for key in FieldKey::ALL {
        if config.is_disabled(key) {
            println!("{} {}", key.as_str().dimmed(), "(disabled)".dimmed());
        } else {
            println!("{}", key.as_str());
        }
    }

    Ok(())
}
