// ABOUTME: Entry point for the tether CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tether::error::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Link {
            container_paths,
            jobs,
        } => commands::link(container_paths, jobs).await,
        Commands::New => commands::new_resource().await,
        Commands::Projects => commands::list_projects().await,
        Commands::Containers { project } => commands::list_containers(project).await,
        Commands::Status { project, container } => {
            commands::status(&project, container.as_deref()).await
        }
        Commands::Restart { project, container } => {
            commands::restart(&project, container.as_deref()).await
        }
        Commands::Unlink { project, container } => {
            commands::unlink(&project, container.as_deref()).await
        }
    }
}
