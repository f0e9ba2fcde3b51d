//! CLI argument definitions for the validation-config generator.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use dhf_cli::config::ConfigOverrides;
use dhf_generate::CollisionPolicy;

#[derive(Parser)]
#[command(
    name = "dhf-checkgen",
    version,
    about = "Generate DHF validation-check YAML configs from CSV check definitions",
    long_about = "Read regulatory check definitions from CSV files and write grouped\n\
                  YAML validation configs for the DHF RAG service.\n\n\
                  Input paths and the output directory come from dhf-checkgen.toml,\n\
                  the DHF_CHECKGEN_CONFIG environment variable, or the flags below."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate one phase<N>-validation.yaml per phase from the analysis checks.
    Phases(GenerateArgs),

    /// Generate cross-cutting-validation.yaml and estar-validation.yaml.
    CrossEstar(GenerateArgs),

    /// Run both generators.
    All(GenerateArgs),

    /// Print the resolved configuration without reading any input.
    Config(ConfigArgs),
}

#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Configuration file (default: $DHF_CHECKGEN_CONFIG, then ./dhf-checkgen.toml).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory receiving the generated YAML files. Must exist.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Analysis Checks CSV.
    #[arg(long = "analysis-checks", value_name = "CSV")]
    pub analysis_checks: Option<PathBuf>,

    /// Cross-Phase Checks CSV.
    #[arg(long = "cross-phase-checks", value_name = "CSV")]
    pub cross_phase_checks: Option<PathBuf>,

    /// eSTAR-Specific Checks CSV.
    #[arg(long = "estar-checks", value_name = "CSV")]
    pub estar_checks: Option<PathBuf>,

    /// What to do when two group labels normalize to the same key.
    #[arg(long = "on-key-collision", value_enum)]
    pub on_key_collision: Option<CollisionArg>,
}

impl ConfigArgs {
    /// Flags that replace values from the configuration file.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            output_dir: self.output_dir.clone(),
            analysis_checks: self.analysis_checks.clone(),
            cross_phase_checks: self.cross_phase_checks.clone(),
            estar_checks: self.estar_checks.clone(),
            on_key_collision: self.on_key_collision.map(CollisionPolicy::from),
        }
    }
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Build every document and print the summary without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CollisionArg {
    /// Abort the run.
    Fail,
    /// Append to the first group with that key.
    Merge,
}

impl From<CollisionArg> for CollisionPolicy {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::Fail => CollisionPolicy::Fail,
            CollisionArg::Merge => CollisionPolicy::Merge,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
