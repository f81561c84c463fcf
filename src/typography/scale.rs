use crate::format::registry::{FormatRegistry, FormatSpec};
use crate::foundation::error::{AdrasterError, AdrasterResult};
use crate::typography::overrides::OverrideTable;
use crate::typography::presets::{DEFAULT_PRESET, PresetBook};
use crate::typography::roles::{FontFace, Role, RoleFaces, RoleSizes};

/// Concrete per-role sizes plus the face each role is set in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypographyScale {
    sizes: RoleSizes,
    faces: RoleFaces,
}

impl TypographyScale {
    /// Pair sizes with faces.
    pub fn new(sizes: RoleSizes, faces: RoleFaces) -> Self {
        Self { sizes, faces }
    }

    /// Pixel size for `role`.
    pub fn size(&self, role: Role) -> u32 {
        self.sizes.get(role)
    }

    /// Face for `role`.
    pub fn face(&self, role: Role) -> &FontFace {
        self.faces.get(role)
    }

    /// All sizes.
    pub fn sizes(&self) -> &RoleSizes {
        &self.sizes
    }

    /// All faces.
    pub fn faces(&self) -> &RoleFaces {
        &self.faces
    }
}

/// Round half up to a whole pixel. Inputs are at least 1.0.
fn round_half_up(v: f64) -> u32 {
    (v + 0.5).floor().min(f64::from(u32::MAX)) as u32
}

/// Scale every base size of `preset` by `multiplier` in one pass.
///
/// Every unrounded size must reach 1 px. Above that bound doubling the multiplier strictly grows
/// every role.
pub fn derive_scale(
    presets: &PresetBook,
    preset: &str,
    multiplier: f64,
) -> AdrasterResult<RoleSizes> {
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return Err(AdrasterError::config(format!(
            "typography multiplier must be finite and > 0, got {multiplier}"
        )));
    }
    let base = presets.require(preset)?;
    if let Some((role, size)) = base
        .iter()
        .find(|&(_, size)| f64::from(size) * multiplier < 1.0)
    {
        return Err(AdrasterError::config(format!(
            "typography multiplier {multiplier} shrinks role '{role}' ({size}px in preset \
             '{preset}') below 1px"
        )));
    }
    Ok(base.map(|size| round_half_up(f64::from(size) * multiplier)))
}

/// Picks the typography for a format: override table first, derived scale otherwise.
#[derive(Clone, Debug)]
pub struct TypographyEngine {
    presets: PresetBook,
    preset: String,
    faces: RoleFaces,
    overrides: OverrideTable,
}

impl Default for TypographyEngine {
    fn default() -> Self {
        Self {
            presets: PresetBook::builtin(),
            preset: DEFAULT_PRESET.to_owned(),
            faces: RoleFaces::default(),
            overrides: OverrideTable::new(),
        }
    }
}

impl TypographyEngine {
    /// Engine deriving from `preset`. Fails when the preset is unknown.
    pub fn new(
        presets: PresetBook,
        preset: &str,
        faces: RoleFaces,
        overrides: OverrideTable,
    ) -> AdrasterResult<Self> {
        presets.require(preset)?;
        Ok(Self {
            presets,
            preset: preset.to_owned(),
            faces,
            overrides,
        })
    }

    /// Active preset name as configured.
    pub fn preset(&self) -> &str {
        &self.preset
    }

    /// Preset book in use.
    pub fn presets(&self) -> &PresetBook {
        &self.presets
    }

    /// Current override table.
    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    /// Same engine with a different override table.
    pub fn with_overrides(&self, overrides: OverrideTable) -> Self {
        Self {
            overrides,
            ..self.clone()
        }
    }

    /// Scale for `format`.
    pub fn scale_for(&self, format: &FormatSpec) -> AdrasterResult<TypographyScale> {
        self.scale_for_id(&format.id, format.font_scale)
    }

    /// Scale for a format id and resolved multiplier. The override for `format_id` wins when
    /// present; the multiplier only feeds derivation.
    pub fn scale_for_id(&self, format_id: &str, multiplier: f64) -> AdrasterResult<TypographyScale> {
        let sizes = match self.overrides.get(format_id) {
            Some(s) => *s,
            None => derive_scale(&self.presets, &self.preset, multiplier)?,
        };
        Ok(TypographyScale::new(sizes, self.faces.clone()))
    }

    /// Derive every format's scale once and check override keys, so bad configuration fails
    /// before any render starts.
    pub fn validate(&self, registry: &FormatRegistry) -> AdrasterResult<()> {
        self.overrides.validate_against(registry)?;
        for f in registry.formats() {
            self.scale_for(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/typography/scale.rs"]
mod tests;
