//! neuronet CLI - query massive edge-list graphs from the command line.
//!
//! Each invocation loads one edge-list file into the CSR engine, runs one
//! query and prints the result as text or JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use neuronet_core::{LoadOptions, NodeId};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

/// neuronet: degree and reachability analysis for massive directed graphs.
#[derive(Parser)]
#[command(name = "neuronet")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Refuse to load graphs whose CSR arrays exceed this size (MB)
    #[arg(long, global = true)]
    max_memory_mb: Option<usize>,

    /// Treat '#' lines as malformed instead of comments
    #[arg(long, global = true)]
    no_comments: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show node/edge counts and load diagnostics
    Stats {
        /// Edge-list file (one "src dst" pair per line)
        file: PathBuf,
    },

    /// Show the out-degree of a node
    Degree {
        file: PathBuf,
        node: NodeId,
    },

    /// List the out-neighbors of a node
    Neighbors {
        file: PathBuf,
        node: NodeId,

        /// Maximum neighbors to print (0 = all)
        #[arg(short, long, default_value = "100")]
        limit: usize,
    },

    /// Find the most connected node (smallest id wins ties)
    MaxDegree {
        file: PathBuf,
    },

    /// Rank nodes by out-degree
    Top {
        file: PathBuf,

        /// Number of nodes to show (0 = all)
        #[arg(short, long, default_value = "10")]
        count: usize,
    },

    /// Breadth-first traversal bounded by depth
    Bfs {
        file: PathBuf,
        start: NodeId,

        /// Maximum number of hops from the start node
        #[arg(short, long, default_value = "2")]
        depth: u32,

        /// Maximum nodes and edges to print (0 = all)
        #[arg(short, long, default_value = "100")]
        limit: usize,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let options = LoadOptions::default()
        .with_max_memory_mb(cli.max_memory_mb)
        .with_comment_prefix(if cli.no_comments {
            None
        } else {
            Some(neuronet_core::DEFAULT_COMMENT_PREFIX)
        });

    let result = match cli.command {
        Commands::Stats { file } => commands::stats(&file, &options, cli.json),
        Commands::Degree { file, node } => commands::degree(&file, &options, node, cli.json),
        Commands::Neighbors { file, node, limit } => {
            commands::neighbors(&file, &options, node, limit, cli.json)
        }
        Commands::MaxDegree { file } => commands::max_degree(&file, &options, cli.json),
        Commands::Top { file, count } => commands::top(&file, &options, count, cli.json),
        Commands::Bfs {
            file,
            start,
            depth,
            limit,
        } => commands::bfs(&file, &options, start, depth, limit, cli.json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
