use crate::utils::parser;
use clap::{Args, Parser, Subcommand};
use nalgebra::Vector3;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "lipid-orient - Rigidly reorient lipid fragments so their tails point along a chosen direction.",
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

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reorient every fragment of a structure onto its target direction.
    Reorient(ReorientArgs),
    /// Report each fragment's root atom and current direction without moving anything.
    Inspect(InspectArgs),
}

/// Options shared by every command that estimates orientations.
#[derive(Args, Debug, Clone, Default)]
pub struct OrientationArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Root atom marker preset (phosphorus, nitrogen-first, nitrogen, first-atom).
    #[arg(long, value_name = "NAME")]
    pub root_preset: Option<String>,

    /// Root atom marker, tried in the order given. Overrides the preset.
    #[arg(long = "root-marker", value_name = "MARKER")]
    pub root_markers: Vec<String>,

    /// Number of atoms farthest from the root averaged into the direction estimate.
    #[arg(long, value_name = "INT")]
    pub tail_count: Option<usize>,

    /// Treat the whole structure as a single rigid body.
    #[arg(long)]
    pub whole_structure: bool,

    /// Fail on the first malformed atom record instead of skipping it.
    #[arg(long)]
    pub strict: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S orientation.tail-count=3
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

/// Target directions supplied on the command line.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Direction applied to every fragment without an explicit target.
    #[arg(
        short = 'd',
        long = "direction",
        value_name = "X,Y,Z",
        allow_hyphen_values = true,
        value_parser = parser::parse_direction
    )]
    pub direction: Option<Vector3<f64>>,

    /// Target for one fragment. Can be used multiple times.
    #[arg(
        short = 't',
        long = "target",
        value_name = "ID=X,Y,Z",
        allow_hyphen_values = true,
        value_parser = parser::parse_target
    )]
    pub targets: Vec<(isize, Vector3<f64>)>,

    /// Table of per-fragment targets (.toml or .csv).
    #[arg(long, value_name = "PATH")]
    pub targets_file: Option<PathBuf>,
}

/// Arguments for the `reorient` subcommand.
#[derive(Args, Debug)]
pub struct ReorientArgs {
    /// Path to the input structure file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output structure file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    #[command(flatten)]
    pub targets: TargetArgs,

    #[command(flatten)]
    pub orientation: OrientationArgs,

    /// Title written to the second remark line of the output.
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Write a per-fragment CSV report.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the input structure file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    #[command(flatten)]
    pub orientation: OrientationArgs,

    /// Write a per-fragment CSV report.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}
