//! pfememory - Juniper PFE free memory check
//!
//! Runs the check over a string table captured from a device and prints
//! the results. The exit code follows the plugin convention
//! (0 OK, 1 WARN, 2 CRIT, 3 UNKNOWN).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use pfememory::{worst_state, CheckPlugin, PfeMemoryConfig, PfeMemoryPlugin, State, StringTable};

/// Juniper PFE free memory check
#[derive(Parser, Debug)]
#[command(name = "pfememory")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// String table file (.json, .yaml or .yml); JSON on stdin when omitted
    #[arg(short = 't', long, global = true)]
    table: Option<PathBuf>,

    /// YAML configuration file with threshold overrides
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error), RUST_LOG takes precedence
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the parsed section as JSON
    Parse,
    /// Print the discovered service names
    Discover,
    /// Check all services, or a single item
    Check {
        /// Only check this item
        #[arg(short = 'i', long)]
        item: Option<String>,

        /// Print the service reports as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Initializes tracing/logging subsystem
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn read_table(path: Option<&Path>) -> Result<StringTable> {
    let Some(path) = path else {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read string table from stdin")?;
        return serde_json::from_str(&input).context("Failed to parse string table from stdin");
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read string table {}", path.display()))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse string table {}", path.display())),
        _ => serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse string table {}", path.display())),
    }
}

fn run(args: Args) -> Result<State> {
    let config = match &args.config {
        Some(path) => PfeMemoryConfig::load(path)?,
        None => PfeMemoryConfig::default(),
    };
    let plugin = PfeMemoryPlugin::new(config);
    let table = read_table(args.table.as_deref())?;
    debug!("Read string table with {} rows", table.len());

    match args.command {
        Command::Parse => {
            let section = plugin.parse(&table);
            println!("{}", serde_json::to_string_pretty(&section)?);
            Ok(State::Ok)
        }
        Command::Discover => {
            let section = plugin.parse(&table);
            for service in plugin.discover(&section) {
                println!("{}", plugin.service_name(&service.item));
            }
            Ok(State::Ok)
        }
        Command::Check { item, json } => {
            let mut reports = plugin.run(&table);
            if let Some(item) = item {
                reports.retain(|report| report.item == item);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in &reports {
                    println!("{} - {}", report.state, report.service_name);
                    for result in &report.results {
                        println!("    {} {} ({})", result.state, result.summary, result.details);
                    }
                    if let Some(err) = &report.error {
                        println!("    UNKNOWN {}", err);
                    }
                }
            }

            Ok(worst_state(&reports))
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    match run(args) {
        Ok(state) => ExitCode::from(state.exit_code()),
        Err(e) => {
            error!("pfememory failed: {:#}", e);
            eprintln!("UNKNOWN - {:#}", e);
            ExitCode::from(State::Unknown.exit_code())
        }
    }
}
