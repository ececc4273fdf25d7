//! Command line configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for the final report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text, graph numbers on stdout and a summary on stderr (default)
    Text,
    /// One JSON document on stdout
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "fullerene-clusters")]
#[command(version)]
#[command(
    about = "Reads pentagonal adjacency graphs of fullerenes in planar code and classifies their pentagon clusters",
    long_about = "Reads pentagonal adjacency graphs of fullerenes in planar code and classifies \
                  them by the partition of 12 realised by the sizes of their pentagon clusters.\n\n\
                  Graphs with up to 12 vertices are supported."
)]
pub struct Cli {
    /// Read graphs from FILE instead of standard input
    #[arg(short, long, value_name = "FILE", global = true)]
    pub input: Option<PathBuf>,

    /// Format of the final report
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Show a spinner on stderr while reading graphs
    #[arg(long, global = true)]
    pub progress: bool,

    /// Enable debug tracing output (logs to stderr)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print all partitions of 12 with their numbers and exit
    Partitions,

    /// Find the graphs whose cluster sizes realise a given partition of 12
    Appearances {
        /// Number of the partition, as listed by `partitions`
        #[arg(value_name = "PARTITION")]
        partition: usize,
    },

    /// Tabulate graphs whose clusters all have at most five, admissibly connected, pentagons
    ValidClusters {
        /// Print the number of times each combination appears
        #[arg(short, long)]
        count: bool,
    },

    /// Find the graphs containing a cluster of six pentagons
    SixCluster,

    /// List the clusters of every graph
    Clusters,
}
