use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "kmerge",
    about = "Merge sorted singly-linked lists by relinking their nodes",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log merge internals at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with sample lists and display options
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge the sample lists and show inputs and output
    Demo(DemoArgs),
    /// Merge lists given on the command line, e.g. `kmerge merge 1,4,5 1,3,4 2,6`
    Merge(MergeArgs),
}

#[derive(Args)]
pub struct DemoArgs {
    /// Print values without node identities
    #[arg(long)]
    pub no_identities: bool,
}

#[derive(Args)]
pub struct MergeArgs {
    /// Comma-separated sorted integers; an empty string is an empty list
    pub lists: Vec<String>,
    /// Print values without node identities
    #[arg(long)]
    pub no_identities: bool,
}
