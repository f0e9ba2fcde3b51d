use std::path::PathBuf;

/// One generated YAML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSummary {
    pub file_name: String,
    /// `None` on a dry run.
    pub path: Option<PathBuf>,
    pub groups: usize,
    pub checks: usize,
}

/// Everything one pipeline read and produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineResult {
    pub name: &'static str,
    pub inputs: Vec<PathBuf>,
    pub input_records: usize,
    pub outputs: Vec<OutputSummary>,
}

impl PipelineResult {
    pub fn total_checks(&self) -> usize {
        self.outputs.iter().map(|output| output.checks).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub pipelines: Vec<PipelineResult>,
}

impl RunResult {
    pub fn total_checks(&self) -> usize {
        self.pipelines.iter().map(PipelineResult::total_checks).sum()
    }

    pub fn outputs(&self) -> impl Iterator<Item = &OutputSummary> {
        self.pipelines.iter().flat_map(|pipeline| pipeline.outputs.iter())
    }
}
