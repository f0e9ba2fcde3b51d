//! Partitioning records into labelled groups and numbering their checks.

use std::collections::HashMap;

use tracing::{debug, warn};

use dhf_model::{
    CheckEntry, CheckId, CheckRecord, GroupKey, ModelError, ValidationDocument, ValidationGroup,
};

use crate::error::Result;
use crate::layout::{CollisionPolicy, GroupOrder, SourceLayout};

/// Rows sharing one raw label, in input order.
pub type LabelledRows<'a> = (&'a str, Vec<&'a CheckRecord>);

/// Partition `records` by the label `label_of` reads from each row.
///
/// Every record lands in exactly one group. Rows keep their input order within
/// a group; groups follow `order`.
pub fn group_records<'a, I, F>(
    records: I,
    label_of: F,
    order: GroupOrder,
) -> Result<Vec<LabelledRows<'a>>>
where
    I: IntoIterator<Item = &'a CheckRecord>,
    F: Fn(&'a CheckRecord) -> Result<&'a str, ModelError>,
{
    let mut groups: Vec<LabelledRows<'a>> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    for record in records {
        let label = label_of(record)?;
        let slot = *index.entry(label).or_insert_with(|| {
            groups.push((label, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(record);
    }
    if order == GroupOrder::Sorted {
        groups.sort_by(|left, right| left.0.cmp(right.0));
    }
    Ok(groups)
}

/// Turn labelled rows into a document, assigning `<prefix>-<abbrev>-NNN` ids.
///
/// `folder_of` supplies the optional folder hint for a group label.
pub fn assign_groups<E, F>(
    groups: Vec<LabelledRows<'_>>,
    layout: &SourceLayout,
    policy: CollisionPolicy,
    folder_of: F,
) -> Result<ValidationDocument<E>>
where
    E: CheckEntry,
    F: Fn(&str) -> Option<String>,
{
    let mut document = ValidationDocument::new();
    for (label, rows) in groups {
        let key = layout.key(label);
        if let Some(existing) = document.get_mut(key.as_str()) {
            match policy {
                CollisionPolicy::Fail => {
                    return Err(ModelError::KeyCollision {
                        key: key.to_string(),
                        first: existing.display_name().to_string(),
                        second: label.to_string(),
                    }
                    .into());
                }
                CollisionPolicy::Merge => {
                    warn!(
                        key = %key,
                        kept = existing.display_name(),
                        merged = label,
                        rows = rows.len(),
                        "merging group labels that normalize to the same key"
                    );
                    fill_group(existing, &key, &rows, layout)?;
                }
            }
        } else {
            let mut group = ValidationGroup::new(label, folder_of(label));
            fill_group(&mut group, &key, &rows, layout)?;
            debug!(key = %key, checks = group.check_count(), "built group");
            document.push_group(key, group);
        }
    }
    Ok(document)
}

fn fill_group<E: CheckEntry>(
    group: &mut ValidationGroup<E>,
    key: &GroupKey,
    rows: &[&CheckRecord],
    layout: &SourceLayout,
) -> Result<()> {
    let abbrev = key.abbrev(layout.abbrev_len);
    let start = group.check_count() + 1;
    for (offset, record) in rows.iter().enumerate() {
        let id = CheckId::compose(&layout.prefix, &abbrev, start + offset);
        group.push(E::build(id, record)?);
    }
    Ok(())
}
