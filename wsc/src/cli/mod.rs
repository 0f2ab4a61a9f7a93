// CLI argument parsing and definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "wsc")]
#[command(about = "List, create and delete workspaces from the terminal")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a YAML console configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the API server URL (e.g. http://localhost:8080)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the workspaces table
    List {
        /// Print the workspaces as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Keep the table on screen, refreshing it periodically
    Watch {
        /// Seconds between refreshes (defaults to the configured poll interval)
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Resolve the route for a workspace and show it
    Open {
        /// Workspace id
        id: String,
    },
    /// Delete workspaces by id, or by selecting rows of the table
    Delete {
        /// Workspace ids to delete
        ids: Vec<String>,

        /// Table row indexes to select and delete (e.g. 0,2)
        #[arg(long, value_delimiter = ',', conflicts_with_all = ["ids", "all"])]
        rows: Vec<usize>,

        /// Select every row and delete them all
        #[arg(long, conflicts_with = "ids")]
        all: bool,
    },
    /// Create a new workspace
    Create {
        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Free-form description
        #[arg(long)]
        description: Option<String>,

        /// Wait until the workspace shows up in the list
        #[arg(long)]
        wait: bool,
    },
}
