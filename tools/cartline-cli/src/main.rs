//! cartline - terminal cart page for the storefront.
//!
//! Commands:
//! - `cartline show` - Show the cart with totals and any stored discount
//! - `cartline apply <CODE>` - Apply a discount code
//! - `cartline clear-code` - Forget the stored discount code

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ApplyArgs, ClearCodeArgs, Reported, ShowArgs};

/// cartline - price a storefront cart and manage its discount code
#[derive(Parser)]
#[command(name = "cartline")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart page
    Show(ShowArgs),

    /// Apply a discount code
    Apply(ApplyArgs),

    /// Forget the stored discount code
    ClearCode(ClearCodeArgs),
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Show(args) => commands::show::run(args, &ctx).await,
        Commands::Apply(args) => commands::apply::run(args, &ctx).await,
        Commands::ClearCode(args) => commands::clear_code::run(args, &ctx).await,
    };

    if let Err(e) = result {
        if e.downcast_ref::<Reported>().is_none() {
            ctx.output.error(&format!("{:#}", e));
        }
        std::process::exit(1);
    }

    Ok(())
}
