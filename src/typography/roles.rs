use std::collections::BTreeMap;

use crate::foundation::error::{AdrasterError, AdrasterResult};

/// Element role a font size is assigned to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Main headline.
    Headline,
    /// Line under the headline.
    Subheadline,
    /// Running copy.
    Body,
    /// Title inside a stat or step card.
    CardTitle,
    /// Small caption text.
    Label,
    /// Big statistic number.
    Statistic,
    /// Call-to-action button text.
    Cta,
    /// Footer bar text.
    Footer,
}

impl Role {
    /// Number of roles.
    pub const COUNT: usize = 8;

    /// Every role, in declaration order.
    pub const ALL: [Role; Role::COUNT] = [
        Role::Headline,
        Role::Subheadline,
        Role::Body,
        Role::CardTitle,
        Role::Label,
        Role::Statistic,
        Role::Cta,
        Role::Footer,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Stable tag string.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Headline => "headline",
            Role::Subheadline => "subheadline",
            Role::Body => "body",
            Role::CardTitle => "card-title",
            Role::Label => "label",
            Role::Statistic => "statistic",
            Role::Cta => "cta",
            Role::Footer => "footer",
        }
    }

    /// Face the brand uses for this role.
    pub fn default_face(self) -> FontFace {
        match self {
            Role::Headline => FontFace::new(DISPLAY_FAMILY, 900),
            Role::CardTitle => FontFace::new(DISPLAY_FAMILY, 700),
            Role::Statistic | Role::Cta => FontFace::new(DISPLAY_FAMILY, 800),
            Role::Label => FontFace::new(TEXT_FAMILY, 500),
            Role::Subheadline | Role::Body | Role::Footer => FontFace::new(TEXT_FAMILY, 300),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Condensed display family used for headlines, numbers and buttons.
pub const DISPLAY_FAMILY: &str = "Saira Condensed";
/// Text family used for copy and captions.
pub const TEXT_FAMILY: &str = "Kanit";

/// Font family plus weight.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FontFace {
    /// Family name as registered with the font book.
    pub family: String,
    /// CSS-style weight (100..=900).
    pub weight: u16,
}

impl FontFace {
    /// Create a face.
    pub fn new(family: impl Into<String>, weight: u16) -> Self {
        Self {
            family: family.into(),
            weight,
        }
    }
}

/// One positive pixel size per [`Role`]. Total by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "BTreeMap<Role, u32>", into = "BTreeMap<Role, u32>")]
pub struct RoleSizes {
    sizes: [u32; Role::COUNT],
}

impl RoleSizes {
    /// Sizes in [`Role::ALL`] order. Every size must be positive.
    pub fn new(sizes: [u32; Role::COUNT]) -> AdrasterResult<Self> {
        if let Some(i) = sizes.iter().position(|&s| s == 0) {
            return Err(AdrasterError::config(format!(
                "font size for role '{}' must be positive",
                Role::ALL[i]
            )));
        }
        Ok(Self { sizes })
    }

    /// Built-in tables only; callers guarantee every entry is non-zero.
    pub(crate) const fn from_positive(sizes: [u32; Role::COUNT]) -> Self {
        Self { sizes }
    }

    /// Build from a role map, failing on any missing role.
    pub fn from_map(map: &BTreeMap<Role, u32>) -> AdrasterResult<Self> {
        let missing: Vec<&str> = Role::ALL
            .iter()
            .filter(|r| !map.contains_key(r))
            .map(|r| r.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(AdrasterError::config(format!(
                "size table is missing roles: {}",
                missing.join(", ")
            )));
        }
        let mut sizes = [0u32; Role::COUNT];
        for (role, size) in map {
            sizes[role.index()] = *size;
        }
        Self::new(sizes)
    }

    /// Size for `role`.
    pub fn get(&self, role: Role) -> u32 {
        self.sizes[role.index()]
    }

    /// `(role, size)` pairs in role order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, u32)> + '_ {
        Role::ALL.iter().map(|&r| (r, self.get(r)))
    }

    pub(crate) fn map(&self, f: impl Fn(u32) -> u32) -> Self {
        Self {
            sizes: self.sizes.map(f),
        }
    }
}

impl TryFrom<BTreeMap<Role, u32>> for RoleSizes {
    type Error = AdrasterError;

    fn try_from(map: BTreeMap<Role, u32>) -> Result<Self, Self::Error> {
        Self::from_map(&map)
    }
}

impl From<RoleSizes> for BTreeMap<Role, u32> {
    fn from(s: RoleSizes) -> Self {
        s.iter().collect()
    }
}

/// One [`FontFace`] per [`Role`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleFaces {
    faces: [FontFace; Role::COUNT],
}

impl Default for RoleFaces {
    fn default() -> Self {
        Self {
            faces: Role::ALL.map(Role::default_face),
        }
    }
}

impl RoleFaces {
    /// Face for `role`.
    pub fn get(&self, role: Role) -> &FontFace {
        &self.faces[role.index()]
    }

    /// Every role set in `family`, keeping the brand weight per role.
    pub fn uniform(family: &str) -> Self {
        Self {
            faces: Role::ALL.map(|r| FontFace::new(family, r.default_face().weight)),
        }
    }

    /// Replace the face of one role.
    pub fn with(mut self, role: Role, face: FontFace) -> Self {
        self.faces[role.index()] = face;
        self
    }

    /// Distinct family names, sorted.
    pub fn families(&self) -> Vec<String> {
        let mut out: Vec<String> = self.faces.iter().map(|f| f.family.clone()).collect();
        out.sort();
        out.dedup();
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/typography/roles.rs"]
mod tests;
