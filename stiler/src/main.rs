mod app;
mod command;
mod config;
mod core;
mod desktop;
mod effect;
mod error;
mod layout;
mod store;
mod system;
mod x11;

use std::path::PathBuf;

use anyhow::{Context, Result};
use argh::FromArgs;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::command::Command;
use crate::config::Config;
use crate::store::StateStore;
use crate::x11::X11;

const PROGRAM_NAME: &str = "Simple Window Tiler";
const PROGRAM_SOURCE: &str = "https://github.com/JaDogg/stiler";

#[derive(FromArgs)]
/// Tile windows of an X11 window manager into predefined layouts.
struct Args {
    /// enable debug logging
    #[argh(switch, short = 'v')]
    verbose: bool,

    /// config file to use instead of the default one
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// operations to run, in order (run `stiler help` to list them)
    #[argh(positional)]
    operations: Vec<String>,
}

fn main() {
    let args: Args = argh::from_env();
    init_tracing(args.verbose);

    if args.operations.is_empty() {
        print_usage();
        std::process::exit(1);
    }

    if let Err(e) = run(&args) {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut app: Option<App<X11>> = None;
    for command in parse_commands(&args.operations) {
        match command {
            Command::Help => print_usage(),
            Command::Version => print_version(),
            Command::CreateDesktops => {
                let exe = std::env::current_exe().context("Failed to locate stiler executable")?;
                desktop::write_desktop_entries(&desktop::applications_dir(), &exe)?;
            }
            command => {
                if app.is_none() {
                    app = Some(start(args.config.clone())?);
                }
                if let Some(app) = app.as_mut() {
                    app.run(command)?;
                }
            }
        }
    }

    Ok(())
}

/// Unrecognized names are reported and skipped.
fn parse_commands(operations: &[String]) -> Vec<Command> {
    operations
        .iter()
        .filter_map(|name| match name.parse() {
            Ok(command) => Some(command),
            Err(message) => {
                tracing::warn!("{}", message);
                None
            }
        })
        .collect()
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn start(config_path: Option<PathBuf>) -> Result<App<X11>> {
    let config_path = config_path.unwrap_or_else(config::config_file);
    let config = Config::load_or_create(&config_path)?;
    let store = StateStore::new(&config.state_file());
    let system = X11::new()?;
    App::new(system, config, store)
}

fn print_usage() {
    let program = std::env::args()
        .next()
        .and_then(|arg0| {
            PathBuf::from(arg0)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "stiler".to_string());

    println!("\nUsage: {} [-v] [-c CONFIG] OPERATION...\n", program);

    let mut commands = Command::ALL.to_vec();
    commands.sort_by_key(|command| command.name());

    println!(" Operations:");
    for command in commands {
        println!(" {:<16} - {}", command.name(), command.description());
    }
    println!();
    print_version();
}

fn print_version() {
    println!(
        "{} {}  <{}>",
        PROGRAM_NAME,
        env!("CARGO_PKG_VERSION"),
        PROGRAM_SOURCE
    );
}
