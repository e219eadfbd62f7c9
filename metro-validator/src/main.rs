use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use tracing::{error, info};

use metro_validator::dataset::{DEFAULT_DATASET_CANDIDATES, find_default_dataset, open_source};
use metro_validator::report::{ConsoleOptions, ErrorResponse, ValidationResponse, console};
use metro_validator::validate::{ValidatorConfig, run_validation};
use metro_validator::web::{
    AppState, DEFAULT_PORT, PORT_ENV, ServerConfig, create_router, resolve_port,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(
    name = "metro-validator",
    about = "Validate metro data integrity",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the SQLite database (.db, .sqlite) or a JSON export
    #[arg(short, long, global = true)]
    db: Option<PathBuf>,

    /// Show warnings as well as errors (use -vv for debug logging)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server for frontend integration
    Serve {
        /// Port to listen on (overridden by the PORT environment variable)
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let db = cli
        .db
        .unwrap_or_else(|| find_default_dataset(DEFAULT_DATASET_CANDIDATES));

    match cli.command {
        Some(Commands::Serve { port }) => {
            let port = resolve_port(std::env::var(PORT_ENV).ok().as_deref(), port);
            serve(ServerConfig::new(db).with_port(port)).await
        }
        None => validate_command(&db, cli.verbose > 0, cli.json),
    }
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default = match verbose {
        0 => "metro_validator=warn",
        1 => "metro_validator=info",
        _ => "metro_validator=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Validate once, print, and map the status to an exit code.
fn validate_command(db: &Path, verbose: bool, json: bool) -> ExitCode {
    if !json {
        print!("{}", console::render_header(VERSION));
    }

    let source = open_source(db);
    let dataset = match source.load() {
        Ok(dataset) => dataset,
        Err(e) => {
            if json {
                print_json(&ErrorResponse::new(&e));
            } else {
                println!("{} {e}", "ERROR:".red());
            }
            return ExitCode::FAILURE;
        }
    };

    let report = run_validation(&dataset, &ValidatorConfig::default());

    if json {
        print_json(&ValidationResponse::new(
            source.describe(),
            dataset.stats(),
            &report,
        ));
    } else {
        print!("{}", console::render_stats(&source.describe(), &dataset.stats()));
        print!(
            "{}",
            console::render_results(&report, ConsoleOptions { verbose })
        );
        print!("{}", console::render_summary(&report));
    }

    if report.status().is_fail() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => error!(error = %e, "failed to encode JSON output"),
    }
}

/// Run the HTTP server until interrupted.
async fn serve(config: ServerConfig) -> ExitCode {
    let source = open_source(&config.dataset);
    let state = AppState::from_shared(source, ValidatorConfig::default());
    let app = create_router(state, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!(%addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    println!();
    println!("  Metro Validator Server v{VERSION}");
    println!("  Database: {}", config.dataset.display());
    println!("  Server:   http://localhost:{}", config.port);
    println!();
    println!("  Endpoints:");
    println!("    GET  /health        - Health check");
    println!("    GET  /api/validate  - Run validation");
    println!();
    info!(%addr, "listening");

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
    {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
