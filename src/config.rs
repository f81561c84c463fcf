use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;

use crate::capture::encode::Encoding;
use crate::capture::pipeline::PipelineOptions;
use crate::format::registry::{FormatRegistry, FormatSpec};
use crate::foundation::error::{AdrasterError, AdrasterResult};
use crate::typography::overrides::OverrideTable;
use crate::typography::presets::{DEFAULT_PRESET, PresetBook};
use crate::typography::roles::{FontFace, Role, RoleFaces, RoleSizes};
use crate::typography::scale::TypographyEngine;

/// Default settle bound in milliseconds.
pub const DEFAULT_SETTLE_TIMEOUT_MS: u64 = 3000;

/// Where and how exported files are written.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Output directory.
    pub dir: PathBuf,
    /// File encoding, e.g. `{"format": "jpeg", "quality": 90}`.
    pub encoding: Encoding,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("exports"),
            encoding: Encoding::Png,
        }
    }
}

/// Studio configuration document (JSON). Every field has a default.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudioConfig {
    /// Format registry, in picker and batch order.
    pub formats: Vec<FormatSpec>,
    /// Typography preset name or alias.
    pub preset: String,
    /// Extra presets by name. Each must size every role.
    pub custom_presets: BTreeMap<String, RoleSizes>,
    /// Hand-authored size tables by format id.
    pub overrides: OverrideTable,
    /// Face replacements by role.
    pub faces: BTreeMap<Role, FontFace>,
    /// Bound on font settlement.
    pub settle_timeout_ms: u64,
    /// Root that content image keys resolve against.
    pub assets_root: Option<PathBuf>,
    /// Font files loaded in the background at startup.
    pub fonts: Vec<PathBuf>,
    /// Output settings.
    pub output: OutputConfig,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            formats: FormatRegistry::builtin().formats().to_vec(),
            preset: DEFAULT_PRESET.to_owned(),
            custom_presets: BTreeMap::new(),
            overrides: OverrideTable::new(),
            faces: BTreeMap::new(),
            settle_timeout_ms: DEFAULT_SETTLE_TIMEOUT_MS,
            assets_root: None,
            fonts: Vec::new(),
            output: OutputConfig::default(),
        }
    }
}

impl StudioConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> AdrasterResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| AdrasterError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a config file. Relative paths inside it are taken relative to
    /// the file's directory.
    pub fn from_path(path: &Path) -> AdrasterResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let mut cfg = Self::from_json_str(&s)?;
        if let Some(base) = path.parent() {
            cfg.rebase(base);
        }
        Ok(cfg)
    }

    fn rebase(&mut self, base: &Path) {
        let fix = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        if let Some(root) = self.assets_root.as_mut() {
            fix(root);
        }
        self.fonts.iter_mut().for_each(&fix);
        fix(&mut self.output.dir);
    }

    /// Format registry built from `formats`.
    pub fn registry(&self) -> AdrasterResult<FormatRegistry> {
        FormatRegistry::new(self.formats.clone())
    }

    /// Built-in presets plus `custom_presets`.
    pub fn presets(&self) -> AdrasterResult<PresetBook> {
        self.custom_presets
            .iter()
            .try_fold(PresetBook::builtin(), |book, (name, sizes)| {
                book.with_custom(name, *sizes)
            })
    }

    /// Default faces with `faces` applied.
    pub fn role_faces(&self) -> RoleFaces {
        self.faces
            .iter()
            .fold(RoleFaces::default(), |faces, (role, face)| {
                faces.with(*role, face.clone())
            })
    }

    /// Typography engine for this config, checked against `registry`.
    pub fn typography(&self, registry: &FormatRegistry) -> AdrasterResult<TypographyEngine> {
        let engine = TypographyEngine::new(
            self.presets()?,
            &self.preset,
            self.role_faces(),
            self.overrides.clone(),
        )?;
        engine.validate(registry)?;
        Ok(engine)
    }

    /// Pipeline knobs.
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            encoding: self.output.encoding,
            settle_timeout: Duration::from_millis(self.settle_timeout_ms),
        }
    }

    /// Run every startup check: registry, presets, overrides, faces and output encoding.
    pub fn validate(&self) -> AdrasterResult<()> {
        let registry = self.registry()?;
        self.typography(&registry)?;
        self.output.encoding.validate()?;
        if let Some((role, _)) = self
            .faces
            .iter()
            .find(|(_, f)| f.family.trim().is_empty() || f.weight == 0)
        {
            return Err(AdrasterError::config(format!(
                "face for role '{role}' needs a family and a non-zero weight"
            )));
        }
        Ok(())
    }

    /// Startup check for rendering: at least one font file is configured and every configured
    /// file exists. Families the files fail to provide surface as a settling error on the first
    /// job.
    pub fn check_fonts(&self) -> AdrasterResult<()> {
        if self.fonts.is_empty() {
            return Err(AdrasterError::config(format!(
                "no font files configured; faces need families: {}",
                self.role_faces().families().join(", ")
            )));
        }
        if let Some(missing) = self.fonts.iter().find(|p| !p.is_file()) {
            return Err(AdrasterError::config(format!(
                "font file '{}' does not exist",
                missing.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
