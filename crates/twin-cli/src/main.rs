//! `twin`: run and inspect strategic twin simulations
//!
//! JSON results go to stdout; logs go to stderr (`RUST_LOG`, default `info`).

mod commands;

use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use commands::Request;
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .value_parser(value_parser!(PathBuf))
        .help("TOML configuration file")
}

fn file_arg() -> Arg {
    Arg::new("file")
        .long("file")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Captured model response (`-` for stdin)")
}

fn request_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("company")
                .long("company")
                .required(true)
                .help("Company to simulate"),
        )
        .arg(
            Arg::new("context")
                .long("context")
                .default_value("")
                .help("Current market context"),
        )
        .arg(
            Arg::new("options")
                .long("options")
                .default_value("")
                .help("Strategic options under consideration"),
        )
}

fn cli() -> Command {
    Command::new("twin")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Strategic digital twin: competitor simulation and flow layout")
        .subcommand_required(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            request_args(Command::new("simulate").about("Run a simulation against the model"))
                .arg(config_arg()),
        )
        .subcommand(request_args(
            Command::new("prompt").about("Print the prompt without calling the model"),
        ))
        .subcommand(
            Command::new("validate")
                .about("Validate a captured model response")
                .arg(file_arg())
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("layout")
                .about("Validate a captured response and lay out its flow graph")
                .arg(file_arg())
                .arg(config_arg()),
        )
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

fn request(args: &ArgMatches) -> Request {
    let get = |name: &str| args.get_one::<String>(name).cloned().unwrap_or_default();
    Request {
        company: get("company"),
        context: get("context"),
        options: get("options"),
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(matches: ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("simulate", args)) => {
            let config = load_config(args)?;
            let value = commands::simulate(&request(args), &config).await?;
            print_json(&value)
        }
        Some(("prompt", args)) => {
            println!("{}", commands::prompt(&request(args)));
            Ok(())
        }
        Some(("validate", args)) => {
            let config = load_config(args)?;
            let raw = commands::read_input(file(args)?)?;
            let artifact = commands::validate(&raw, &config)?;
            print_json(&serde_json::to_value(&artifact)?)
        }
        Some(("layout", args)) => {
            let config = load_config(args)?;
            let raw = commands::read_input(file(args)?)?;
            print_json(&commands::layout(&raw, &config)?)
        }
        _ => Err(anyhow::anyhow!("unknown subcommand")),
    }
}

fn load_config(args: &ArgMatches) -> Result<twin_core::TwinConfig> {
    commands::load_config(args.get_one::<PathBuf>("config").map(PathBuf::as_path))
}

fn file(args: &ArgMatches) -> Result<&std::path::Path> {
    args.get_one::<PathBuf>("file")
        .map(PathBuf::as_path)
        .ok_or_else(|| anyhow::anyhow!("--file is required"))
}

#[tokio::main]
async fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));
    tracing::debug!(command = matches.subcommand_name().unwrap_or_default(), "starting");

    match run(matches).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
