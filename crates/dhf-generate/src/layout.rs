//! Per-source rules for keys, identifiers and group ordering.

use serde::Deserialize;

use dhf_model::GroupKey;

/// How group labels become document keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStyle {
    /// See [`GroupKey::safe`].
    Safe,
    /// See [`GroupKey::simple`].
    Simple,
}

/// Order in which groups are emitted.
///
/// The phase source sorts; the cross-phase and eSTAR sources keep first-seen
/// order. Downstream consumers may rely on either, so both are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOrder {
    Sorted,
    FirstSeen,
}

/// What to do when two distinct labels normalize to the same key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Abort the run.
    #[default]
    Fail,
    /// Append the later label's rows to the earlier group, continuing its
    /// sequence numbers.
    Merge,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLayout {
    pub prefix: String,
    pub abbrev_len: usize,
    pub key_style: KeyStyle,
    pub order: GroupOrder,
}

impl SourceLayout {
    /// Categories within one phase: `P<phase_num>-<4 chars>-NNN`.
    pub fn analysis(phase_num: &str) -> Self {
        Self {
            prefix: format!("P{phase_num}"),
            abbrev_len: 4,
            key_style: KeyStyle::Safe,
            order: GroupOrder::Sorted,
        }
    }

    /// Cross-phase check types: `X-<5 chars>-NNN`.
    pub fn cross_phase() -> Self {
        Self {
            prefix: "X".to_string(),
            abbrev_len: 5,
            key_style: KeyStyle::Simple,
            order: GroupOrder::FirstSeen,
        }
    }

    /// eSTAR check categories: `ESTAR-<6 chars>-NNN`.
    pub fn estar() -> Self {
        Self {
            prefix: "ESTAR".to_string(),
            abbrev_len: 6,
            key_style: KeyStyle::Simple,
            order: GroupOrder::FirstSeen,
        }
    }

    pub fn key(&self, label: &str) -> GroupKey {
        match self.key_style {
            KeyStyle::Safe => GroupKey::safe(label),
            KeyStyle::Simple => GroupKey::simple(label),
        }
    }
}
