// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tether")]
#[command(about = "Link container manifests to projects on a remote deployment platform")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Link (deploy) containers to the project of the current directory
    Link {
        /// Container directories relative to the project root (default: all)
        container_paths: Vec<String>,

        /// Upper bound on in-flight deploys
        #[arg(short = 'j', long, default_value_t = 1)]
        jobs: usize,
    },

    /// Scaffold a new project or container manifest interactively
    New,

    /// List remote projects
    Projects,

    /// List the containers of a project
    Containers {
        /// Project ID (default: the project of the current directory)
        project: Option<String>,
    },

    /// Show the state of a project or one of its containers
    Status {
        project: String,
        container: Option<String>,
    },

    /// Restart a project or one of its containers
    Restart {
        project: String,
        container: Option<String>,
    },

    /// Unlink a project or one of its containers
    Unlink {
        project: String,
        container: Option<String>,
    },
}
