pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use smartshop_core::config::{AppConfig, LogFormat};

use commands::compare::CompareArgs;
use commands::login::LoginArgs;
use commands::order::OrderArgs;
use commands::recommend::RecommendArgs;
use commands::search::SearchArgs;
use commands::GlobalArgs;

#[derive(Debug, Parser)]
#[command(
    name = "smartshop",
    about = "Smart Shop grocery CLI",
    long_about = "Search the grocery catalog, compare retailer prices for a cart, get recommendations and place demo orders.",
    after_help = "Examples:\n  smartshop search \"oat drink\" --sort price_asc\n  smartshop compare --item coca-cola-15:2 --item rye-bread\n  smartshop doctor --json"
)]
pub struct Cli {
    #[arg(long, global = true, value_name = "PATH", help = "Config file to load")]
    config: Option<PathBuf>,
    #[arg(long, global = true, value_name = "PATH", help = "Dataset overriding catalog.path")]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Search the catalog by name or brand")]
    Search(SearchArgs),
    #[command(about = "Summarize a cart and compare its total across retailers")]
    Compare(CompareArgs),
    #[command(about = "Recommend products related to a cart")]
    Recommend(RecommendArgs),
    #[command(about = "Place a simulated order with one retailer")]
    Order(OrderArgs),
    #[command(about = "Sign in against the demo account directory")]
    Login(LoginArgs),
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, dataset and retailer readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let globals = GlobalArgs { config_path: cli.config, catalog: cli.catalog };

    // Config errors are reported by the command itself.
    let logging_config = AppConfig::load(globals.load_options()).unwrap_or_default();
    init_logging(&logging_config);

    let result = match cli.command {
        Command::Search(args) => commands::search::run(&globals, args),
        Command::Compare(args) => commands::compare::run(&globals, args),
        Command::Recommend(args) => commands::recommend::run(&globals, args),
        Command::Order(args) => commands::order::run(&globals, args),
        Command::Login(args) => commands::login::run(args),
        Command::Config => commands::config::run(&globals),
        Command::Doctor { json } => commands::doctor::run(&globals, json),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(log_level);

    match config.logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}
