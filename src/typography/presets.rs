use std::collections::BTreeMap;

use crate::foundation::error::{AdrasterError, AdrasterResult};
use crate::typography::roles::{Role, RoleSizes};

/// Preset used when nothing else is configured.
pub const DEFAULT_PRESET: &str = "large";

/// Built-in presets as `(name, alias, sizes)` in role order:
/// headline, subheadline, body, card-title, label, statistic, cta, footer.
const BUILTIN: [(&str, &str, [u32; Role::COUNT]); 4] = [
    ("compact", "desktop", [52, 26, 18, 20, 14, 32, 20, 13]),
    ("balanced", "balanced", [64, 32, 24, 24, 20, 38, 26, 16]),
    ("large", "mobile", [76, 38, 30, 28, 26, 46, 34, 20]),
    ("maximum-impact", "bold", [92, 46, 34, 32, 28, 54, 40, 22]),
];

/// Closed set of named base size tables.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetBook {
    presets: BTreeMap<String, RoleSizes>,
    aliases: BTreeMap<String, String>,
}

impl Default for PresetBook {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PresetBook {
    /// Book containing the four built-in presets and their aliases.
    pub fn builtin() -> Self {
        let mut presets = BTreeMap::new();
        let mut aliases = BTreeMap::new();
        for (name, alias, sizes) in BUILTIN {
            presets.insert(name.to_owned(), RoleSizes::from_positive(sizes));
            if alias != name {
                aliases.insert(alias.to_owned(), name.to_owned());
            }
        }
        Self { presets, aliases }
    }

    /// Add a custom preset. Names must not collide with an existing preset or alias.
    pub fn with_custom(mut self, name: &str, sizes: RoleSizes) -> AdrasterResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AdrasterError::config("preset name must be non-empty"));
        }
        if self.presets.contains_key(name) || self.aliases.contains_key(name) {
            return Err(AdrasterError::config(format!(
                "preset '{name}' is already defined"
            )));
        }
        self.presets.insert(name.to_owned(), sizes);
        Ok(self)
    }

    /// Canonical name for `name`, following aliases.
    pub fn canonical<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        if let Some((k, _)) = self.presets.get_key_value(name) {
            return Some(k.as_str());
        }
        self.aliases.get(name).map(String::as_str)
    }

    /// Base sizes for `name` (or one of its aliases).
    pub fn get(&self, name: &str) -> Option<&RoleSizes> {
        self.canonical(name).and_then(|n| self.presets.get(n))
    }

    /// Base sizes for `name`, failing with a configuration error.
    pub fn require(&self, name: &str) -> AdrasterResult<&RoleSizes> {
        self.get(name).ok_or_else(|| {
            AdrasterError::config(format!(
                "unknown typography preset '{name}' (known: {})",
                self.names().join(", ")
            ))
        })
    }

    /// Canonical preset names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.presets.keys().map(String::as_str).collect()
    }

    /// Name of the preset whose base table equals `sizes`, if any.
    pub fn match_sizes(&self, sizes: &RoleSizes) -> Option<&str> {
        self.presets
            .iter()
            .find(|(_, s)| *s == sizes)
            .map(|(n, _)| n.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/typography/presets.rs"]
mod tests;
