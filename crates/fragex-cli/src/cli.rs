use crate::config::PropertyKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "fragex CLI - inclusion-exclusion (many-body) expansions over fragmented molecular systems.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel term evaluation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the n-mers and inclusion-exclusion terms of a truncated expansion and evaluate a property.
    Expand(ExpandArgs),
    /// List the fragments of a system together with all of their distinct intersections.
    Intersections(SystemArgs),
    /// Print the fragment-level (GMBE) weights of a system closed under intersection.
    Weights(WeightsArgs),
}

/// Input and limits shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct SystemArgs {
    /// Path to the system description in TOML format (atoms and fragments).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to an expansion configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the maximum number of members intersected to reach one subset.
    #[arg(long, value_name = "INT")]
    pub max_depth: Option<usize>,

    /// Override the maximum number of distinct subsets a single search may record.
    #[arg(long, value_name = "INT")]
    pub max_subsets: Option<usize>,
}

/// Arguments for the `expand` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ExpandArgs {
    #[command(flatten)]
    pub system: SystemArgs,

    /// Override the truncation order (the largest number of fragments in one n-mer).
    #[arg(short = 'n', long, value_name = "INT")]
    pub order: Option<usize>,

    /// Also generate every n-mer smaller than the truncation order.
    #[arg(long)]
    pub include_lower_orders: bool,

    /// Keep k-mers whose coefficients cancel to zero in the expression.
    #[arg(long)]
    pub keep_zero_terms: bool,

    /// Override the property evaluated for every term.
    #[arg(short, long, value_enum, value_name = "PROPERTY")]
    pub property: Option<PropertyKind>,

    /// Export the evaluated terms to a CSV file.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}

/// Arguments for the `weights` subcommand.
#[derive(Args, Debug, Clone)]
pub struct WeightsArgs {
    #[command(flatten)]
    pub system: SystemArgs,

    /// Keep subsystems whose weights cancel to zero.
    #[arg(long)]
    pub keep_zero_terms: bool,
}
