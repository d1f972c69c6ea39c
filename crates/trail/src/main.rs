//! Trail CLI - navigation menu previewer.
//!
//! Provides commands for:
//! - `render`: Print the menu markup activated for a path
//! - `breadcrumbs`: Print the breadcrumb trail for a path
//! - `tree`: Print the activated menu as JSON

mod commands;
mod error;
mod output;
mod site;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BreadcrumbsArgs, RenderArgs, TreeArgs};
use output::Output;

/// Trail - navigation menu previewer.
#[derive(Parser)]
#[command(name = "trail", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the menu markup for a request path.
    Render(RenderArgs),
    /// Print the breadcrumb trail for a request path.
    Breadcrumbs(BreadcrumbsArgs),
    /// Print the activated menu tree as JSON.
    Tree(TreeArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Render(args) => args.menu.verbose,
            Self::Breadcrumbs(args) => args.menu.verbose,
            Self::Tree(args) => args.menu.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Breadcrumbs(args) => args.execute(),
        Commands::Tree(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
