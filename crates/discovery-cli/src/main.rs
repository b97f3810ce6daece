//! Operator CLI for a discovery session stored on disk

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use discovery_core::{
    ContinueOutcome, DiscoveryConfig, DiscoveryReport, DiscoveryStore, FileStore,
    InMemoryCaseRegistry, StepNavigator,
};
use discovery_model::{catalog, StepId};
use discovery_rules::risk_label;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_DATA_DIR: &str = ".discovery";

fn cli() -> Command {
    Command::new("discovery")
        .version(discovery_core::VERSION)
        .about("Advisor discovery wizard")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding the session state"),
        )
        .arg(
            Arg::new("as-of")
                .long("as-of")
                .global(true)
                .value_parser(value_parser!(NaiveDate))
                .help("Date used for ages and the report (YYYY-MM-DD)"),
        )
        .subcommand(Command::new("status").about("Show the current step and progress"))
        .subcommand(
            Command::new("report")
                .about("Print the discovery report")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("set")
                .about("Apply a JSON partial update to the record")
                .arg(Arg::new("patch").required(true).help("JSON object keyed by field")),
        )
        .subcommand(Command::new("continue").about("Validate and complete the current step"))
        .subcommand(Command::new("back").about("Return to the previous step"))
        .subcommand(
            Command::new("jump")
                .about("Jump to a completed step")
                .arg(
                    Arg::new("step")
                        .required(true)
                        .value_parser(value_parser!(u8))
                        .help("Step number"),
                ),
        )
        .subcommand(Command::new("reset").about("Discard the session and start over"))
}

fn load_config(matches: &ArgMatches) -> Result<DiscoveryConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => DiscoveryConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => DiscoveryConfig::default(),
    };
    if let Some(dir) = matches.get_one::<PathBuf>("data-dir") {
        config = config.with_data_dir(dir.clone());
    }
    Ok(config)
}

fn init_tracing(config: &DiscoveryConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_status(store: &DiscoveryStore<FileStore>) {
    let current = store.current_step();
    println!(
        "Step {current} of {}: {}",
        StepId::LAST,
        catalog::step_name(current)
    );
    for step in StepId::all() {
        let marker = if step == current {
            '>'
        } else if store.is_step_completed(step) {
            '*'
        } else {
            ' '
        };
        println!(
            " {marker} {step}. {:<28} {:>3}%",
            catalog::step_name(step),
            store.step_completion(step)
        );
    }
    let missing = store.missing_fields(current);
    if !missing.is_empty() {
        println!("Missing on this step:");
        for field in missing {
            println!("  - {} ({})", field.label, field.key);
        }
    }
    println!("Risk profile: {}", risk_label(store.data()));
}

fn print_outcome(outcome: &ContinueOutcome) {
    match outcome {
        ContinueOutcome::Blocked { step, missing, .. } => {
            println!("Step {step} is incomplete:");
            for field in missing {
                println!("  - {} ({})", field.label, field.key);
            }
        }
        ContinueOutcome::Advanced {
            completed,
            next,
            risk_label,
        } => {
            println!(
                "Completed step {completed} ({}); now on step {next} ({})",
                catalog::step_name(*completed),
                catalog::step_name(*next)
            );
            if let Some(label) = risk_label {
                println!("Risk profile: {label}");
            }
        }
        ContinueOutcome::Finished { report } => {
            println!("Discovery complete.");
            print!("{}", report.summary());
        }
    }
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    let config = load_config(&matches)?;
    init_tracing(&config);

    let data_dir = config
        .storage
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    let files = FileStore::open(&data_dir)
        .with_context(|| format!("opening session directory {}", data_dir.display()))?;
    let mut store = DiscoveryStore::load(files, &config.storage);
    tracing::debug!(data_dir = %data_dir.display(), namespace = %config.storage.namespace, "session opened");

    let today = matches
        .get_one::<NaiveDate>("as-of")
        .copied()
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    // No case registry is attached to a CLI session; case sync is skipped.
    let navigator = StepNavigator::new(InMemoryCaseRegistry::new()).with_as_of(today);

    match matches.subcommand() {
        Some(("status", _)) => print_status(&store),
        Some(("report", args)) => {
            let report = DiscoveryReport::from_data(store.data(), today);
            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.summary());
            }
        }
        Some(("set", args)) => {
            let Some(raw) = args.get_one::<String>("patch") else {
                bail!("missing patch argument");
            };
            let patch: serde_json::Value =
                serde_json::from_str(raw).context("patch is not valid JSON")?;
            store.apply_patch(&patch)?;
            println!(
                "Updated; {} field(s) missing on step {}",
                store.missing_count(store.current_step()),
                store.current_step()
            );
        }
        Some(("continue", _)) => {
            let outcome = navigator.continue_step(&mut store)?;
            print_outcome(&outcome);
            if outcome.is_blocked() {
                std::process::exit(2);
            }
        }
        Some(("back", _)) => {
            let step = navigator.back(&mut store);
            println!("Now on step {step} ({})", catalog::step_name(step));
        }
        Some(("jump", args)) => {
            let target = args.get_one::<u8>("step").copied().map(StepId).unwrap_or_default();
            navigator.jump_to(&mut store, target)?;
            println!("Now on step {target} ({})", catalog::step_name(target));
        }
        Some(("reset", _)) => {
            store.reset_discovery();
            println!("Discovery session reset");
        }
        _ => bail!("unknown command"),
    }
    Ok(())
}
