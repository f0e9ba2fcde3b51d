//! Cross-phase and eSTAR checks: one document per source file.

use tracing::debug;

use dhf_model::{CheckRecord, ValidationDocument};

use crate::entries::{CrossPhaseCheck, EstarCheck, columns};
use crate::error::Result;
use crate::grouping::{assign_groups, group_records};
use crate::layout::{CollisionPolicy, SourceLayout};

pub const CROSS_PHASE_FILE_NAME: &str = "cross-cutting-validation.yaml";
pub const ESTAR_FILE_NAME: &str = "estar-validation.yaml";

/// Group cross-phase checks by `Check Type`, in first-seen order.
pub fn generate_cross_phase_document(
    records: &[CheckRecord],
    policy: CollisionPolicy,
) -> Result<ValidationDocument<CrossPhaseCheck>> {
    let layout = SourceLayout::cross_phase();
    let groups = group_records(records, |r| r.required(columns::CHECK_TYPE), layout.order)?;
    let document = assign_groups(groups, &layout, policy, |_| None)?;
    debug!(
        check_types = document.len(),
        checks = document.total_checks(),
        "built cross-phase document"
    );
    Ok(document)
}

/// Group eSTAR checks by `Check Category`, in first-seen order.
pub fn generate_estar_document(
    records: &[CheckRecord],
    policy: CollisionPolicy,
) -> Result<ValidationDocument<EstarCheck>> {
    let layout = SourceLayout::estar();
    let groups = group_records(records, |r| r.required(columns::CHECK_CATEGORY), layout.order)?;
    let document = assign_groups(groups, &layout, policy, |_| None)?;
    debug!(
        sections = document.len(),
        checks = document.total_checks(),
        "built eSTAR document"
    );
    Ok(document)
}
