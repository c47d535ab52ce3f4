use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use crate::core::telemetry::FieldKey;
use crate::core::Config;

pub fn execute(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("show", _)) => show(),
        Some(("timeout", sub_matches)) => set_timeout(sub_matches),
        Some(("disable", sub_matches)) => toggle_field(sub_matches, true),
        Some(("enable", sub_matches)) => toggle_field(sub_matches, false),
        Some(("reset", _)) => reset(),
        _ => {
            println!("Use 'hostsnap config --help' for more information.");
            Ok(())
        }
    }
}

fn show() -> Result<()> {
    let config = Config::load()?;
    println!("{}", Config::get_config_path()?.display().to_string().dimmed());
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn set_timeout(matches: &ArgMatches) -> Result<()> {
    let timeout_ms = *matches
        .get_one::<u64>("ms")
        .context("Timeout argument is required")?;
    if timeout_ms == 0 {
        anyhow::bail!("Probe timeout must be greater than zero");
    }

    let mut config = Config::load()?;
    config.probe_timeout_ms = timeout_ms;
    config.save()?;

    println!("Probe timeout set to {} ms", timeout_ms.to_string().cyan());
    Ok(())
}

fn toggle_field(matches: &ArgMatches, disable: bool) -> Result<()> {
    let name = matches
        .get_one::<String>("field")
        .context("Field argument is required")?;
    let key: FieldKey = name.parse()?;

    let mut config = Config::load()?;
    config.disabled_fields.retain(|k| *k != key);
    if disable {
        config.disabled_fields.push(key);
        config.disabled_fields.sort();
    }
    config.save()?;

    let state = if disable { "disabled".yellow() } else { "enabled".green() };
    println!("Field {} {}", key.as_str().cyan(), state);
    Ok(())
}

fn reset() -> Result<()> {
    Config::default().save()?;
    println!("{}", "Configuration reset to defaults".green());
    Ok(())
}
