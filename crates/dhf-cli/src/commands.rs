use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::debug;

use dhf_cli::config::GeneratorConfig;
use dhf_cli::pipeline::{self, Target};
use dhf_cli::types::RunResult;
use dhf_generate::CollisionPolicy;

use crate::cli::{ConfigArgs, GenerateArgs};
use crate::summary::{apply_table_style, header_cell};

pub fn run_generate(target: Target, args: &GenerateArgs) -> Result<RunResult> {
    let (config, _) = resolve_config(&args.config)?;
    pipeline::run(target, &config, args.dry_run)
}

pub fn run_config(args: &ConfigArgs) -> Result<()> {
    let (config, source) = resolve_config(args)?;
    println!("{}", config_table(&config, source.as_deref()));
    Ok(())
}

fn config_table(config: &GeneratorConfig, source: Option<&Path>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Setting"), header_cell("Value")]);
    apply_table_style(&mut table);
    let source = source.map_or_else(
        || "built-in defaults".to_string(),
        |path| path.display().to_string(),
    );
    let policy = match config.on_key_collision {
        CollisionPolicy::Fail => "fail",
        CollisionPolicy::Merge => "merge",
    };
    table.add_row(vec!["config file".to_string(), source]);
    table.add_row(vec![
        "output_dir".to_string(),
        config.output_dir.display().to_string(),
    ]);
    table.add_row(vec!["on_key_collision".to_string(), policy.to_string()]);
    table.add_row(vec![
        "inputs.analysis_checks".to_string(),
        config.inputs.analysis_checks.display().to_string(),
    ]);
    table.add_row(vec![
        "inputs.cross_phase_checks".to_string(),
        config.inputs.cross_phase_checks.display().to_string(),
    ]);
    table.add_row(vec![
        "inputs.estar_checks".to_string(),
        config.inputs.estar_checks.display().to_string(),
    ]);
    table
}

fn resolve_config(args: &ConfigArgs) -> Result<(GeneratorConfig, Option<PathBuf>)> {
    let (mut config, source) =
        GeneratorConfig::resolve(args.config.as_deref()).context("load configuration")?;
    config.apply_overrides(args.overrides());
    debug!(
        config_file = ?source,
        output_dir = %config.output_dir.display(),
        "resolved configuration"
    );
    Ok((config, source))
}
