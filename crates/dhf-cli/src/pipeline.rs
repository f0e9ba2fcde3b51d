//! The two generation pipelines: load, group, emit.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use dhf_generate::{
    CROSS_PHASE_FILE_NAME, CollisionPolicy, ESTAR_FILE_NAME, generate_cross_phase_document,
    generate_estar_document, generate_phase_documents,
};
use dhf_ingest::read_check_records;
use dhf_model::{CheckRecord, ValidationDocument};
use dhf_output::{to_yaml_string, write_document};

use crate::config::GeneratorConfig;
use crate::types::{OutputSummary, PipelineResult, RunResult};

/// Which pipelines a run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Phases,
    CrossEstar,
    All,
}

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub output_dir: PathBuf,
    pub policy: CollisionPolicy,
    /// Build and render every document but write nothing.
    pub dry_run: bool,
}

impl GenerateOptions {
    pub fn from_config(config: &GeneratorConfig, dry_run: bool) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            policy: config.on_key_collision,
            dry_run,
        }
    }
}

/// Run the pipelines selected by `target`, stopping at the first failure.
pub fn run(target: Target, config: &GeneratorConfig, dry_run: bool) -> Result<RunResult> {
    let options = GenerateOptions::from_config(config, dry_run);
    let mut pipelines = Vec::new();
    if matches!(target, Target::Phases | Target::All) {
        pipelines.push(run_phases(&config.inputs.analysis_checks, &options)?);
    }
    if matches!(target, Target::CrossEstar | Target::All) {
        pipelines.push(run_cross_estar(
            &config.inputs.cross_phase_checks,
            &config.inputs.estar_checks,
            &options,
        )?);
    }
    Ok(RunResult {
        output_dir: options.output_dir,
        dry_run,
        pipelines,
    })
}

/// Analysis checks to one file per phase.
///
/// Every phase document is built before the first file is written.
pub fn run_phases(input: &Path, options: &GenerateOptions) -> Result<PipelineResult> {
    let span = info_span!("phases", input = %input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let records = load(input, "analysis checks")?;
    let phases = generate_phase_documents(&records, options.policy)
        .with_context(|| format!("group analysis checks from {}", input.display()))?;

    let mut outputs = Vec::with_capacity(phases.len());
    for phase in &phases {
        outputs.push(emit(options, &phase.file_name(), &phase.document)?);
    }
    info!(
        phases = phases.len(),
        records = records.len(),
        duration_ms = start.elapsed().as_millis(),
        "phase validation configs generated"
    );
    Ok(PipelineResult {
        name: "phases",
        inputs: vec![input.to_path_buf()],
        input_records: records.len(),
        outputs,
    })
}

/// Cross-phase and eSTAR checks, one file each.
///
/// The cross-phase file is written before the eSTAR source is read.
pub fn run_cross_estar(
    cross_input: &Path,
    estar_input: &Path,
    options: &GenerateOptions,
) -> Result<PipelineResult> {
    let span = info_span!("cross_estar");
    let _guard = span.enter();
    let start = Instant::now();

    let cross_records = load(cross_input, "cross-phase checks")?;
    let cross = generate_cross_phase_document(&cross_records, options.policy)
        .with_context(|| format!("group cross-phase checks from {}", cross_input.display()))?;
    let cross_output = emit(options, CROSS_PHASE_FILE_NAME, &cross)?;

    let estar_records = load(estar_input, "eSTAR checks")?;
    let estar = generate_estar_document(&estar_records, options.policy)
        .with_context(|| format!("group eSTAR checks from {}", estar_input.display()))?;
    let estar_output = emit(options, ESTAR_FILE_NAME, &estar)?;

    let input_records = cross_records.len() + estar_records.len();
    info!(
        records = input_records,
        duration_ms = start.elapsed().as_millis(),
        "cross-cutting and eSTAR configs generated"
    );
    Ok(PipelineResult {
        name: "cross-estar",
        inputs: vec![cross_input.to_path_buf(), estar_input.to_path_buf()],
        input_records,
        outputs: vec![cross_output, estar_output],
    })
}

fn load(path: &Path, what: &str) -> Result<Vec<CheckRecord>> {
    let records =
        read_check_records(path).with_context(|| format!("read {what}: {}", path.display()))?;
    info!(path = %path.display(), records = records.len(), "read {what}");
    Ok(records)
}

fn emit<E: Serialize>(
    options: &GenerateOptions,
    file_name: &str,
    document: &ValidationDocument<E>,
) -> Result<OutputSummary> {
    let path = if options.dry_run {
        to_yaml_string(document).with_context(|| format!("render {file_name}"))?;
        None
    } else {
        let path = write_document(&options.output_dir, file_name, document)
            .with_context(|| format!("write {file_name}"))?;
        Some(path)
    };
    info!(
        file = file_name,
        groups = document.len(),
        checks = document.total_checks(),
        dry_run = options.dry_run,
        "created validation file"
    );
    Ok(OutputSummary {
        file_name: file_name.to_string(),
        path,
        groups: document.len(),
        checks: document.total_checks(),
    })
}
