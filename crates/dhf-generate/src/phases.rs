//! Analysis checks: one document per phase, groups per category.

use std::collections::BTreeMap;

use tracing::debug;

use dhf_model::{CheckRecord, ModelError, ValidationDocument};

use crate::entries::{AnalysisCheck, columns};
use crate::error::{GenerateError, Result};
use crate::grouping::{assign_groups, group_records};
use crate::layout::{CollisionPolicy, GroupOrder, SourceLayout};

/// All checks of one phase, ready to be written.
#[derive(Debug, Clone)]
pub struct PhaseDocument {
    pub phase_name: String,
    /// Last whitespace-delimited token of the phase name, not necessarily numeric.
    pub phase_num: String,
    pub document: ValidationDocument<AnalysisCheck>,
}

impl PhaseDocument {
    pub fn file_name(&self) -> String {
        phase_file_name(&self.phase_num)
    }
}

pub fn phase_file_name(phase_num: &str) -> String {
    format!("phase{phase_num}-validation.yaml")
}

/// `"Phase 3"` yields `"3"`. `None` for a blank name.
pub fn phase_number(phase_name: &str) -> Option<&str> {
    phase_name.split_whitespace().next_back()
}

/// Build one document per phase, phases and categories in sorted order.
pub fn generate_phase_documents(
    records: &[CheckRecord],
    policy: CollisionPolicy,
) -> Result<Vec<PhaseDocument>> {
    // Resolve both grouping columns up front so a bad row fails before any
    // document is built.
    for record in records {
        record.required(columns::PHASE)?;
        record.required(columns::CATEGORY)?;
    }

    let phases = group_records(records, |r| r.required(columns::PHASE), GroupOrder::Sorted)?;
    let mut files: BTreeMap<String, String> = BTreeMap::new();
    let mut documents = Vec::with_capacity(phases.len());
    for (phase_name, rows) in phases {
        let line = rows.first().map_or(0, |record| record.line());
        let phase_num = phase_number(phase_name).ok_or(ModelError::EmptyPhase { line })?;
        let file_name = phase_file_name(phase_num);
        if let Some(first) = files.insert(file_name.clone(), phase_name.to_string()) {
            return Err(GenerateError::DuplicatePhaseOutput {
                file_name,
                first,
                second: phase_name.to_string(),
            });
        }

        let layout = SourceLayout::analysis(phase_num);
        let categories = group_records(rows, |r| r.required(columns::CATEGORY), layout.order)?;
        let document = assign_groups(categories, &layout, policy, |category| {
            Some(format!("{phase_name}/{category}"))
        })?;
        debug!(
            phase = phase_name,
            categories = document.len(),
            checks = document.total_checks(),
            "built phase document"
        );
        documents.push(PhaseDocument {
            phase_name: phase_name.to_string(),
            phase_num: phase_num.to_string(),
            document,
        });
    }
    Ok(documents)
}
