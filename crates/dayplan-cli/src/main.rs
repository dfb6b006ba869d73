use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod store;

#[derive(Parser)]
#[command(name = "dayplan", version, about = "Place events on a daily schedule")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Place an event, relocating or asking for confirmation on conflicts
    Place(commands::place::PlaceArgs),
    /// List committed events of a day
    List(commands::list::ListArgs),
    /// Show free intervals of a day
    Free(commands::free::FreeArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("DAYPLAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Place(args) => commands::place::run(args),
        Commands::List(args) => commands::list::run(args),
        Commands::Free(args) => commands::free::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
