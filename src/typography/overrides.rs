use std::collections::BTreeMap;
use std::sync::Arc;

use crate::foundation::error::{AdrasterError, AdrasterResult};
use crate::format::registry::FormatRegistry;
use crate::typography::roles::RoleSizes;

/// Immutable per-format size overrides, keyed by format id.
///
/// Edits never touch a table in place: [`OverrideTable::with`] and [`OverrideTable::without`]
/// return a new table and leave every clone of the old one unchanged.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(
    from = "BTreeMap<String, RoleSizes>",
    into = "BTreeMap<String, RoleSizes>"
)]
pub struct OverrideTable {
    entries: Arc<BTreeMap<String, RoleSizes>>,
}

impl OverrideTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with `format_id` set to `sizes`.
    pub fn with(&self, format_id: impl Into<String>, sizes: RoleSizes) -> Self {
        let mut next = (*self.entries).clone();
        next.insert(format_id.into(), sizes);
        Self {
            entries: Arc::new(next),
        }
    }

    /// Table without an entry for `format_id`.
    pub fn without(&self, format_id: &str) -> Self {
        if !self.entries.contains_key(format_id) {
            return self.clone();
        }
        let mut next = (*self.entries).clone();
        next.remove(format_id);
        Self {
            entries: Arc::new(next),
        }
    }

    /// Hand-authored sizes for `format_id`.
    pub fn get(&self, format_id: &str) -> Option<&RoleSizes> {
        self.entries.get(format_id)
    }

    /// Overridden format ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of overridden formats.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no format is overridden.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reject keys that name no format in `registry`.
    pub fn validate_against(&self, registry: &FormatRegistry) -> AdrasterResult<()> {
        for id in self.ids() {
            if registry.get(id).is_none() {
                return Err(AdrasterError::config(format!(
                    "typography override for unknown format id '{id}'"
                )));
            }
        }
        Ok(())
    }
}

impl From<BTreeMap<String, RoleSizes>> for OverrideTable {
    fn from(entries: BTreeMap<String, RoleSizes>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }
}

impl From<OverrideTable> for BTreeMap<String, RoleSizes> {
    fn from(t: OverrideTable) -> Self {
        Arc::unwrap_or_clone(t.entries)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/typography/overrides.rs"]
mod tests;
