use crate::utils::parser::parse_recipe;
use clap::{Args, Parser, Subcommand, ValueEnum};
use examol::store::recipe::SimpleRecipe;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "ExaMol Developers",
    version,
    about = "ExaMol CLI - Rank ensemble predictions for candidate molecules and pick the next simulations to run.",
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
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one selection round over a file of ensemble predictions.
    Select(SelectArgs),
}

/// Scoring policies selectable from the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    /// Mean of the ensemble predictions.
    Greedy,
    /// Mean plus `alpha` standard deviations.
    Ucb,
    /// Fraction of ensemble members above the improvement threshold.
    Pi,
}

/// Arguments for the `select` subcommand.
#[derive(Args, Debug)]
pub struct SelectArgs {
    // --- Core Arguments ---
    /// Path to the prediction samples (CSV with a 'key' column followed by ensemble members).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub predictions: PathBuf,

    /// Path to a selection configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the ranked selection to this CSV file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to known molecule records (CSV with an 'identifier' column and 'name@level' columns).
    #[arg(short, long, value_name = "PATH")]
    pub database: Option<PathBuf>,

    // --- Selection Overrides ---
    /// Override the number of computations to select.
    #[arg(short = 'n', long, value_name = "INT")]
    pub to_select: Option<usize>,

    /// Override the scoring policy.
    #[arg(long, value_enum)]
    pub policy: Option<PolicyKind>,

    /// Override the exploration weight of the 'ucb' policy.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub alpha: Option<f64>,

    /// Override the initial improvement threshold of the 'pi' policy.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub threshold: Option<f64>,

    /// Override the improvement margin of the 'pi' policy.
    #[arg(long, value_name = "FLOAT")]
    pub epsilon: Option<f64>,

    /// Override the optimization direction from the config file.
    #[command(flatten)]
    pub direction: Direction,

    /// Property recipe used to refresh the policy from the database. Can be used multiple times.
    /// Example: -r ip@xtb
    #[arg(short = 'r', long = "recipe", value_name = "NAME@LEVEL", value_parser = parse_recipe)]
    pub recipes: Vec<SimpleRecipe>,

    // --- Cold Start ---
    /// Seed for the random cold-start selection.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Never fall back to random selection, even if the database is below the start threshold.
    #[arg(long)]
    pub no_cold_start: bool,
}

/// A group to handle mutually exclusive optimization direction flags.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = false, multiple = false)]
pub struct Direction {
    /// Select candidates with the highest predicted values.
    #[arg(long)]
    pub maximize: bool,
    /// Select candidates with the lowest predicted values.
    #[arg(long)]
    pub minimize: bool,
}
