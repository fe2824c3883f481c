//! diagsieve - Reclassify TypeScript diagnostics with per-file gitattributes rules
//!
//! This is the main entry point for the CLI application.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use diagsieve::cli::{self, exit_codes, Cli, Commands};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    let result = run(&cli).await;

    // Handle exit codes for CI integration
    match result {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            if cli.forces_success() {
                std::process::exit(exit_codes::SUCCESS);
            }
            std::process::exit(exit_codes::ERROR);
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<i32> {
    let working_dir = cli.working_dir()?;

    match &cli.command {
        Commands::Init(args) => cli::commands::init::execute(args.clone(), &working_dir).await,
        Commands::Check(args) => {
            let config = cli.load_config(&working_dir)?;
            Ok(cli::commands::check::execute(args.clone(), &config, &working_dir).await?)
        }
        Commands::Rules(args) => {
            let config = cli.load_config(&working_dir)?;
            Ok(cli::commands::rules::execute(args.clone(), &config, &working_dir).await?)
        }
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}
