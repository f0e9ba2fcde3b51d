//! Integration tests for phase, cross-phase and eSTAR generation.

use std::collections::BTreeSet;

use dhf_generate::entries::columns;
use dhf_generate::{
    AnalysisCheck, CollisionPolicy, GenerateError, generate_cross_phase_document,
    generate_estar_document, generate_phase_documents,
};
use dhf_model::{CheckEntry, CheckRecord, ModelError, ValidationDocument};
use proptest::prelude::*;

fn analysis(line: u64, phase: &str, category: &str, question: &str) -> CheckRecord {
    CheckRecord::from_pairs(
        line,
        [
            (columns::PHASE, phase),
            (columns::CATEGORY, category),
            (columns::DRAFT_CHECK_FOR_REVIEW, question),
            (columns::REGULATORY_SOURCE, "21 CFR 820.30"),
            (columns::SOURCE_SECTION, "Design controls"),
            (columns::ESTAR_SECTION_RELEVANCE, "Software"),
        ],
    )
}

fn cross(line: u64, check_type: &str) -> CheckRecord {
    CheckRecord::from_pairs(
        line,
        [
            (columns::CHECK_TYPE, check_type),
            (columns::DRAFT_CHECK_FOR_REVIEW, "Do requirements trace to tests?"),
            (columns::PHASES_INVOLVED, "Phase 2, Phase 4"),
            (columns::REGULATORY_SOURCE, "ISO 13485"),
            (columns::SOURCE_SECTION, "7.3"),
            (columns::ESTAR_SECTION_RELEVANCE, "Performance Testing"),
        ],
    )
}

fn estar(line: u64, category: &str) -> CheckRecord {
    CheckRecord::from_pairs(
        line,
        [
            (columns::CHECK_CATEGORY, category),
            (columns::DRAFT_CHECK, "Is the device description complete?"),
            (columns::ESTAR_SECTION, "Device Description"),
            (columns::FDA_GUIDANCE_REFERENCE, "eSTAR guidance"),
        ],
    )
}

fn ids<E: CheckEntry>(doc: &ValidationDocument<E>, key: &str) -> Vec<String> {
    doc.get(key)
        .expect("group present")
        .checks()
        .iter()
        .map(|check| check.check_id().to_string())
        .collect()
}

#[test]
fn two_categories_in_one_phase() {
    let records = vec![
        analysis(2, "Phase 1", "Software", "Is the SRS approved?"),
        analysis(3, "Phase 1", "Hardware", "Is the BOM released?"),
    ];

    let phases = generate_phase_documents(&records, CollisionPolicy::Fail).unwrap();

    assert_eq!(phases.len(), 1);
    let phase = &phases[0];
    assert_eq!(phase.phase_num, "1");
    assert_eq!(phase.file_name(), "phase1-validation.yaml");
    let keys: Vec<&str> = phase.document.keys().collect();
    assert_eq!(keys, vec!["hardware", "software"]);
    assert_eq!(ids(&phase.document, "software"), vec!["P1-SOFT-001"]);
    assert_eq!(ids(&phase.document, "hardware"), vec!["P1-HARD-001"]);
    assert_eq!(
        phase.document.get("software").and_then(|g| g.folder_path()),
        Some("Phase 1/Software")
    );
}

#[test]
fn phases_are_sorted_and_sequences_restart_per_category() {
    let records = vec![
        analysis(2, "Phase 3", "Risk Management", "a"),
        analysis(3, "Phase 1", "Design Inputs", "b"),
        analysis(4, "Phase 3", "Risk Management", "c"),
        analysis(5, "Phase 3", "Labeling (IFU)", "d"),
        analysis(6, "Phase 3", "Risk Management", "e"),
    ];

    let phases = generate_phase_documents(&records, CollisionPolicy::Fail).unwrap();

    let names: Vec<&str> = phases.iter().map(|p| p.phase_name.as_str()).collect();
    assert_eq!(names, vec!["Phase 1", "Phase 3"]);
    let phase3 = &phases[1].document;
    assert_eq!(phase3.keys().collect::<Vec<_>>(), vec!["labeling_ifu", "risk_management"]);
    assert_eq!(
        ids(phase3, "risk_management"),
        vec!["P3-RISK-001", "P3-RISK-002", "P3-RISK-003"]
    );
    assert_eq!(ids(phase3, "labeling_ifu"), vec!["P3-LABE-001"]);
    let questions: Vec<&str> = phase3
        .get("risk_management")
        .unwrap()
        .checks()
        .iter()
        .map(|check: &AnalysisCheck| check.llm_validation.question.as_str())
        .collect();
    assert_eq!(questions, vec!["a", "c", "e"]);
}

#[test]
fn non_numeric_phase_suffix_flows_into_ids() {
    let records = vec![analysis(2, "Closeout", "Software", "q")];
    let phases = generate_phase_documents(&records, CollisionPolicy::Fail).unwrap();
    assert_eq!(phases[0].phase_num, "Closeout");
    assert_eq!(ids(&phases[0].document, "software"), vec!["PCloseout-SOFT-001"]);
}

#[test]
fn blank_phase_name_is_rejected() {
    let records = vec![analysis(4, "  ", "Software", "q")];
    let error = generate_phase_documents(&records, CollisionPolicy::Fail).unwrap_err();
    assert!(matches!(
        error,
        GenerateError::Model(ModelError::EmptyPhase { line: 4 })
    ));
}

#[test]
fn phases_sharing_a_number_are_rejected() {
    let records = vec![
        analysis(2, "Phase 2", "Software", "q"),
        analysis(3, "Stage 2", "Software", "q"),
    ];
    let error = generate_phase_documents(&records, CollisionPolicy::Fail).unwrap_err();
    match error {
        GenerateError::DuplicatePhaseOutput {
            file_name,
            first,
            second,
        } => {
            assert_eq!(file_name, "phase2-validation.yaml");
            assert_eq!(first, "Phase 2");
            assert_eq!(second, "Stage 2");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_required_column_aborts_the_phase_run() {
    let mut records = vec![analysis(2, "Phase 1", "Software", "q")];
    records.push(CheckRecord::from_pairs(3, [(columns::PHASE, "Phase 1")]));
    let error = generate_phase_documents(&records, CollisionPolicy::Fail).unwrap_err();
    assert_eq!(error.to_string(), "line 3: missing required column `Category`");
}

#[test]
fn missing_optional_columns_become_empty_strings() {
    let records = vec![analysis(2, "Phase 1", "Software", "q")];
    let phases = generate_phase_documents(&records, CollisionPolicy::Fail).unwrap();
    let check = &phases[0].document.get("software").unwrap().checks()[0];
    assert_eq!(check.design_vv_reference, "");
    assert_eq!(check.testing_ref, "");
    assert_eq!(check.priority, "");
    assert_eq!(check.automation_feasibility, "");
    assert_eq!(check.notes, "");
}

#[test]
fn header_only_inputs_produce_empty_results() {
    assert!(
        generate_phase_documents(&[], CollisionPolicy::Fail)
            .unwrap()
            .is_empty()
    );
    let cross_doc = generate_cross_phase_document(&[], CollisionPolicy::Fail).unwrap();
    assert!(cross_doc.is_empty());
    assert_eq!(cross_doc.total_checks(), 0);
    let estar_doc = generate_estar_document(&[], CollisionPolicy::Fail).unwrap();
    assert!(estar_doc.is_empty());
}

#[test]
fn cross_phase_groups_keep_first_seen_order() {
    let records = vec![
        cross(2, "Traceability"),
        cross(3, "Consistency Check"),
        cross(4, "Traceability"),
    ];

    let doc = generate_cross_phase_document(&records, CollisionPolicy::Fail).unwrap();

    assert_eq!(
        doc.keys().collect::<Vec<_>>(),
        vec!["traceability", "consistency_check"]
    );
    assert_eq!(ids(&doc, "traceability"), vec!["X-TRACE-001", "X-TRACE-002"]);
    assert_eq!(ids(&doc, "consistency_check"), vec!["X-CONSI-001"]);
    assert_eq!(doc.get("traceability").unwrap().folder_path(), None);
    let check = &doc.get("traceability").unwrap().checks()[0];
    assert_eq!(check.phases_involved, "Phase 2, Phase 4");
}

#[test]
fn estar_ids_use_six_character_abbreviation() {
    let records = vec![
        estar(2, "Device Description"),
        estar(3, "Labeling"),
        estar(4, "Device Description"),
    ];

    let doc = generate_estar_document(&records, CollisionPolicy::Fail).unwrap();

    assert_eq!(
        doc.keys().collect::<Vec<_>>(),
        vec!["device_description", "labeling"]
    );
    assert_eq!(
        ids(&doc, "device_description"),
        vec!["ESTAR-DEVICE-001", "ESTAR-DEVICE-002"]
    );
    assert_eq!(ids(&doc, "labeling"), vec!["ESTAR-LABELI-001"]);
    assert_eq!(doc.get("labeling").unwrap().display_name(), "Labeling");
}

#[test]
fn key_collision_fails_by_default() {
    let records = vec![cross(2, "Design Review"), cross(3, "design review")];
    let error = generate_cross_phase_document(&records, CollisionPolicy::Fail).unwrap_err();
    assert!(matches!(
        error,
        GenerateError::Model(ModelError::KeyCollision { ref key, ref first, ref second })
            if key == "design_review" && first == "Design Review" && second == "design review"
    ));
}

#[test]
fn key_collision_merges_when_requested() {
    let records = vec![
        cross(2, "Design Review"),
        cross(3, "design review"),
        cross(4, "Design Review"),
    ];

    let doc = generate_cross_phase_document(&records, CollisionPolicy::Merge).unwrap();

    assert_eq!(doc.len(), 1);
    let group = doc.get("design_review").unwrap();
    assert_eq!(group.display_name(), "Design Review");
    assert_eq!(group.check_count(), 3);
    assert_eq!(
        ids(&doc, "design_review"),
        vec!["X-DESIG-001", "X-DESIG-002", "X-DESIG-003"]
    );
}

fn category_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "Software",
        "Hardware",
        "Risk Management",
        "risk management",
        "Labeling (IFU)",
        "V&V",
    ])
    .prop_map(str::to_string)
}

proptest! {
    #[test]
    fn grouping_is_a_total_partition(
        rows in prop::collection::vec(
            (prop::sample::select(vec!["Phase 1", "Phase 2", "Phase 3"]), category_strategy()),
            0..40,
        )
    ) {
        let records: Vec<CheckRecord> = rows
            .iter()
            .enumerate()
            .map(|(idx, (phase, category))| {
                analysis(idx as u64 + 2, phase, category, &format!("question {idx}"))
            })
            .collect();

        let phases = generate_phase_documents(&records, CollisionPolicy::Merge).unwrap();

        let total: usize = phases.iter().map(|p| p.document.total_checks()).sum();
        prop_assert_eq!(total, records.len());

        let mut seen = BTreeSet::new();
        for phase in &phases {
            for (_, group) in phase.document.groups() {
                prop_assert_eq!(group.check_count(), group.checks().len());
                let mut group_ids = BTreeSet::new();
                for (idx, check) in group.checks().iter().enumerate() {
                    let id = check.check_id().as_str();
                    let expected_suffix = format!("-{:03}", idx + 1);
                    let expected_prefix = format!("P{}-", phase.phase_num);
                    prop_assert!(id.ends_with(&expected_suffix));
                    prop_assert!(id.starts_with(&expected_prefix));
                    prop_assert!(group_ids.insert(id.to_string()));
                    prop_assert!(check.check_name().chars().count() <= 100);
                    prop_assert!(seen.insert(check.llm_validation.question.clone()));
                }
            }
        }
        prop_assert_eq!(seen.len(), records.len());
    }
}
