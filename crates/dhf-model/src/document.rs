#![deny(unsafe_code)]

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::error::Result;
use crate::ids::{CheckId, GroupKey};
use crate::record::CheckRecord;

/// One emitted validation check.
///
/// Each input source has its own entry layout; field declaration order is the
/// emission order.
pub trait CheckEntry: Serialize + Sized {
    /// Build the entry for `record` under the already-assigned `id`.
    fn build(id: CheckId, record: &CheckRecord) -> Result<Self>;

    fn check_id(&self) -> &CheckId;

    fn check_name(&self) -> &str;
}

/// Question posed to the LLM validator for a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LlmValidation {
    pub question: String,
    pub validation_criteria: ValidationCriteria,
}

impl LlmValidation {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            validation_criteria: ValidationCriteria::default(),
        }
    }
}

/// Criteria are authored downstream; generation always starts empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationCriteria {
    pub must_include: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationGroup<E> {
    display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    folder_path: Option<String>,
    check_count: usize,
    validation_checks: Vec<E>,
}

impl<E> ValidationGroup<E> {
    pub fn new(display_name: impl Into<String>, folder_path: Option<String>) -> Self {
        Self {
            display_name: display_name.into(),
            folder_path,
            check_count: 0,
            validation_checks: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: E) {
        self.validation_checks.push(entry);
        self.check_count = self.validation_checks.len();
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn folder_path(&self) -> Option<&str> {
        self.folder_path.as_deref()
    }

    pub fn check_count(&self) -> usize {
        self.check_count
    }

    pub fn checks(&self) -> &[E] {
        &self.validation_checks
    }
}

/// Root object of one output file: group key to group, in insertion order.
#[derive(Debug, Clone)]
pub struct ValidationDocument<E> {
    groups: Vec<(GroupKey, ValidationGroup<E>)>,
}

impl<E> Default for ValidationDocument<E> {
    fn default() -> Self {
        Self { groups: Vec::new() }
    }
}

impl<E> ValidationDocument<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a group. Callers check for an existing key first.
    pub fn push_group(&mut self, key: GroupKey, group: ValidationGroup<E>) {
        self.groups.push((key, group));
    }

    pub fn get(&self, key: &str) -> Option<&ValidationGroup<E>> {
        self.groups
            .iter()
            .find(|(existing, _)| existing.as_str() == key)
            .map(|(_, group)| group)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ValidationGroup<E>> {
        self.groups
            .iter_mut()
            .find(|(existing, _)| existing.as_str() == key)
            .map(|(_, group)| group)
    }

    pub fn groups(&self) -> impl Iterator<Item = (&GroupKey, &ValidationGroup<E>)> {
        self.groups.iter().map(|(key, group)| (key, group))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total_checks(&self) -> usize {
        self.groups.iter().map(|(_, group)| group.check_count).sum()
    }
}

impl<E: Serialize> Serialize for ValidationDocument<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (key, group) in &self.groups {
            map.serialize_entry(key.as_str(), group)?;
        }
        map.end()
    }
}
