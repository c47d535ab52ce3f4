use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, Command};

use hostsnap::commands;

fn snapshot_args() -> Vec<Arg> {
    vec![
        Arg::new("json")
            .long("json")
            .help("Print the snapshot as JSON")
            .action(ArgAction::SetTrue),
        Arg::new("timeout")
            .short('t')
            .long("timeout")
            .value_name("MS")
            .help("Per-probe timeout in milliseconds")
            .value_parser(value_parser!(u64).range(1..)),
        Arg::new("sequential")
            .long("sequential")
            .help("Run probes one after another instead of concurrently")
            .action(ArgAction::SetTrue),
        Arg::new("field")
            .short('f')
            .long("field")
            .value_name("KEY")
            .help("Only collect this field (repeatable, see 'hostsnap fields')")
            .action(ArgAction::Append),
    ]
}

fn main() -> Result<()> {
    let matches = Command::new("hostsnap")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Collect a one-shot snapshot of host hardware and OS telemetry")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log probe timings and failures to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .args(snapshot_args())
        .subcommand(
            Command::new("snapshot")
                .about("Collect and print a snapshot (default)")
                .args(snapshot_args()),
        )
        .subcommand(Command::new("fields").about("List the field keys a snapshot can contain"))
        .subcommand(
            Command::new("config")
                .about("Manage configuration (use 'hostsnap config --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("show").about("Show the config path and current values"))
                .subcommand(
                    Command::new("timeout")
                        .about("Set the default per-probe timeout")
                        .arg(
                            Arg::new("ms")
                                .help("Timeout in milliseconds")
                                .required(true)
                                .index(1)
                                .value_parser(value_parser!(u64)),
                        ),
                )
                .subcommand(
                    Command::new("disable")
                        .about("Leave a field out of every snapshot")
                        .arg(Arg::new("field").help("Field key").required(true).index(1)),
                )
                .subcommand(
                    Command::new("enable")
                        .about("Collect a previously disabled field again")
                        .arg(Arg::new("field").help("Field key").required(true).index(1)),
                )
                .subcommand(Command::new("reset").about("Restore the default configuration")),
        )
        .get_matches();

    if matches.get_flag("verbose") {
        hostsnap::init_logging_with(log::LevelFilter::Debug);
    } else {
        hostsnap::init_logging();
    }

    match matches.subcommand() {
        Some(("snapshot", sub_matches)) => commands::snapshot(sub_matches)?,
        Some(("fields", _)) => commands::fields()?,
        Some(("config", sub_matches)) => commands::config::execute(sub_matches)?,
        _ => commands::snapshot(&matches)?,
    }

    Ok(())
}
