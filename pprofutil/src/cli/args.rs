//! CLI argument definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::analysis::GroupBy;

#[derive(Parser)]
#[command(
    name = "pprofutil",
    version,
    about = "Decode Go profile function names and inspect sample stacks",
    after_help = "\
EXAMPLES:
    pprofutil parse 'net/http.(*conn).serve.func1'     Decompose a function name
    pprofutil top cpu.json --by package              Hottest packages
    pprofutil fold cpu.json --output cpu.folded      Folded stacks for flamegraphs"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decompose function names into package, type and function
    Parse {
        /// Function names as recorded in the profile
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,

        /// Print one JSON object per name
        #[arg(long)]
        json: bool,
    },

    /// Print the flattened call stack of every sample
    Stacks {
        /// Profile in JSON form
        #[arg(value_name = "PROFILE")]
        profile: PathBuf,
    },

    /// Show the hottest functions, types or packages
    Top {
        /// Profile in JSON form
        #[arg(value_name = "PROFILE")]
        profile: PathBuf,

        /// Aggregation key
        #[arg(long, value_enum, default_value_t = GroupBy::Function)]
        by: GroupBy,

        /// Show at most N rows (0 = unlimited)
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Export folded stacks for flamegraph tools
    Fold {
        /// Profile in JSON form
        #[arg(value_name = "PROFILE")]
        profile: PathBuf,

        /// Write to file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}
