//! Grouping, check-id assignment and entry building for each check source.

pub mod cross_estar;
pub mod entries;
pub mod error;
pub mod grouping;
pub mod layout;
pub mod phases;

pub use cross_estar::{
    CROSS_PHASE_FILE_NAME, ESTAR_FILE_NAME, generate_cross_phase_document,
    generate_estar_document,
};
pub use entries::{AnalysisCheck, CrossPhaseCheck, EstarCheck};
pub use error::{GenerateError, Result};
pub use grouping::{LabelledRows, assign_groups, group_records};
pub use layout::{CollisionPolicy, GroupOrder, KeyStyle, SourceLayout};
pub use phases::{PhaseDocument, generate_phase_documents, phase_file_name, phase_number};
