use anyhow::{Context, Result};
use clap::ArgMatches;
use std::time::Duration;

use crate::core::telemetry::{Aggregator, ExecutionMode, FieldKey, ProbeRegistry};
use crate::core::Config;
use crate::ui::format_snapshot;

/// Collect one snapshot and print it.
///
/// Exits successfully even when some fields failed; only configuration
/// problems are returned as errors.
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = Config::load()?;
    let mut aggregator_config = config.aggregator_config();

    if let Some(timeout_ms) = matches.get_one::<u64>("timeout") {
        aggregator_config.probe_timeout = Duration::from_millis(*timeout_ms);
    }
    if matches.get_flag("sequential") {
        aggregator_config.execution = ExecutionMode::Sequential;
    }

    let mut registry = ProbeRegistry::standard(&config);
    if let Some(fields) = matches.get_many::<String>("field") {
        let keys = fields
            .map(|name| name.parse::<FieldKey>())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        registry.retain(&keys);
    }

    let aggregator = Aggregator::new(registry, aggregator_config)
        .context("No fields selected; check --field and disabled_fields in the config")?;
    let snapshot = aggregator.collect_blocking()?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", format_snapshot(&snapshot));
    }

    Ok(())
}
