//! Entry layouts for the three check sources.

use serde::Serialize;

use dhf_model::{
    CHECK_NAME_MAX_CHARS, CheckEntry, CheckId, CheckRecord, LlmValidation, Result,
    truncate_chars,
};

/// Column names as they appear in the source spreadsheets.
pub mod columns {
    pub const PHASE: &str = "Phase";
    pub const CATEGORY: &str = "Category";
    pub const CHECK_TYPE: &str = "Check Type";
    pub const CHECK_CATEGORY: &str = "Check Category";

    pub const DRAFT_CHECK_FOR_REVIEW: &str = "Draft Analysis Check (for review/editing)";
    pub const DRAFT_CHECK: &str = "Draft Analysis Check";
    pub const REGULATORY_SOURCE: &str = "Regulatory Source";
    pub const SOURCE_SECTION: &str = "Source Section";
    pub const ESTAR_SECTION_RELEVANCE: &str = "eSTAR Section Relevance";
    pub const ESTAR_SECTION: &str = "eSTAR Section";
    pub const FDA_GUIDANCE_REFERENCE: &str = "FDA Guidance Reference";
    pub const PHASES_INVOLVED: &str = "Phases/Categories Involved";

    pub const DESIGN_VV_REFERENCE: &str = "Design V&V Reference";
    pub const TESTING_REF: &str = "Testing Ref";
    pub const PRIORITY: &str = "Priority";
    pub const AUTOMATION_FEASIBILITY: &str = "Automation Feasibility";
    pub const NOTES: &str = "Notes";
}

/// Severity assigned to every phase check.
pub const DEFAULT_SEVERITY: &str = "high";

/// Remediation steps attached to every phase check.
pub const DEFAULT_REMEDIATION: [&str; 2] = [
    "Review regulatory requirements",
    "Update documentation per guidance",
];

fn truncated_name(question: &str) -> String {
    truncate_chars(question, CHECK_NAME_MAX_CHARS).to_string()
}

/// A check from the Analysis Checks sheet, grouped by phase and category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisCheck {
    pub check_id: CheckId,
    pub check_name: String,
    pub severity: String,
    pub regulatory_source: String,
    pub source_section: String,
    pub estar_section: String,
    pub design_vv_reference: String,
    pub testing_ref: String,
    pub llm_validation: LlmValidation,
    pub failure_message: String,
    pub remediation: Vec<String>,
    pub priority: String,
    pub automation_feasibility: String,
    pub notes: String,
}

impl CheckEntry for AnalysisCheck {
    fn build(id: CheckId, record: &CheckRecord) -> Result<Self> {
        let question = record.required(columns::DRAFT_CHECK_FOR_REVIEW)?;
        Ok(Self {
            check_name: truncated_name(question),
            severity: DEFAULT_SEVERITY.to_string(),
            regulatory_source: record.required(columns::REGULATORY_SOURCE)?.to_string(),
            source_section: record.required(columns::SOURCE_SECTION)?.to_string(),
            estar_section: record.required(columns::ESTAR_SECTION_RELEVANCE)?.to_string(),
            design_vv_reference: record.optional(columns::DESIGN_VV_REFERENCE).to_string(),
            testing_ref: record.optional(columns::TESTING_REF).to_string(),
            llm_validation: LlmValidation::new(question),
            failure_message: format!("Validation check {id} failed"),
            remediation: DEFAULT_REMEDIATION.iter().map(ToString::to_string).collect(),
            priority: record.optional(columns::PRIORITY).to_string(),
            automation_feasibility: record.optional(columns::AUTOMATION_FEASIBILITY).to_string(),
            notes: record.optional(columns::NOTES).to_string(),
            check_id: id,
        })
    }

    fn check_id(&self) -> &CheckId {
        &self.check_id
    }

    fn check_name(&self) -> &str {
        &self.check_name
    }
}

/// A check from the Cross-Phase Checks sheet, grouped by check type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossPhaseCheck {
    pub check_id: CheckId,
    pub check_name: String,
    pub phases_involved: String,
    pub regulatory_source: String,
    pub source_section: String,
    pub estar_section: String,
    pub design_vv_reference: String,
    pub llm_validation: LlmValidation,
    pub priority: String,
    pub automation_feasibility: String,
    pub notes: String,
}

impl CheckEntry for CrossPhaseCheck {
    fn build(id: CheckId, record: &CheckRecord) -> Result<Self> {
        let question = record.required(columns::DRAFT_CHECK_FOR_REVIEW)?;
        Ok(Self {
            check_id: id,
            check_name: truncated_name(question),
            phases_involved: record.required(columns::PHASES_INVOLVED)?.to_string(),
            regulatory_source: record.required(columns::REGULATORY_SOURCE)?.to_string(),
            source_section: record.required(columns::SOURCE_SECTION)?.to_string(),
            estar_section: record.required(columns::ESTAR_SECTION_RELEVANCE)?.to_string(),
            design_vv_reference: record.optional(columns::DESIGN_VV_REFERENCE).to_string(),
            llm_validation: LlmValidation::new(question),
            priority: record.optional(columns::PRIORITY).to_string(),
            automation_feasibility: record.optional(columns::AUTOMATION_FEASIBILITY).to_string(),
            notes: record.optional(columns::NOTES).to_string(),
        })
    }

    fn check_id(&self) -> &CheckId {
        &self.check_id
    }

    fn check_name(&self) -> &str {
        &self.check_name
    }
}

/// A check from the eSTAR-Specific Checks sheet, grouped by check category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EstarCheck {
    pub check_id: CheckId,
    pub check_name: String,
    pub estar_section: String,
    pub fda_guidance: String,
    pub llm_validation: LlmValidation,
    pub priority: String,
    pub notes: String,
}

impl CheckEntry for EstarCheck {
    fn build(id: CheckId, record: &CheckRecord) -> Result<Self> {
        let question = record.required(columns::DRAFT_CHECK)?;
        Ok(Self {
            check_id: id,
            check_name: truncated_name(question),
            estar_section: record.required(columns::ESTAR_SECTION)?.to_string(),
            fda_guidance: record.required(columns::FDA_GUIDANCE_REFERENCE)?.to_string(),
            llm_validation: LlmValidation::new(question),
            priority: record.optional(columns::PRIORITY).to_string(),
            notes: record.optional(columns::NOTES).to_string(),
        })
    }

    fn check_id(&self) -> &CheckId {
        &self.check_id
    }

    fn check_name(&self) -> &str {
        &self.check_name
    }
}
