use std::collections::HashSet;

use crate::foundation::core::Canvas;
use crate::foundation::error::{AdrasterError, AdrasterResult};

/// Structural arrangement tag selected from target geometry.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutVariant {
    /// Stacked, centered composition for 1:1 canvases.
    Square,
    /// Stacked composition with extra vertical breathing room.
    Portrait,
    /// Tall composition for 9:16 story placements.
    Story,
    /// Side-by-side text and imagery for wide link ads.
    Landscape,
    /// Headline-only composition for video thumbnails.
    WideThumbnail,
}

impl LayoutVariant {
    /// Every variant, in declaration order.
    pub const ALL: [LayoutVariant; 5] = [
        LayoutVariant::Square,
        LayoutVariant::Portrait,
        LayoutVariant::Story,
        LayoutVariant::Landscape,
        LayoutVariant::WideThumbnail,
    ];

    /// Stable tag string.
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutVariant::Square => "square",
            LayoutVariant::Portrait => "portrait",
            LayoutVariant::Story => "story",
            LayoutVariant::Landscape => "landscape",
            LayoutVariant::WideThumbnail => "wide-thumbnail",
        }
    }
}

impl std::fmt::Display for LayoutVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_font_scale() -> f64 {
    1.0
}

/// A named, fixed output geometry plus its typography multiplier and layout variant.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FormatSpec {
    /// Unique id, e.g. `meta-feed`.
    pub id: String,
    /// Human label shown by pickers.
    pub label: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Typography multiplier. `1.0` means no adjustment.
    #[serde(default = "default_font_scale")]
    pub font_scale: f64,
    /// Structural arrangement used at this geometry.
    pub layout_variant: LayoutVariant,
}

impl FormatSpec {
    /// Create a format spec. Validation happens when it joins a [`FormatRegistry`].
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        width: u32,
        height: u32,
        font_scale: f64,
        layout_variant: LayoutVariant,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            width,
            height,
            font_scale,
            layout_variant,
        }
    }

    /// Pixel geometry.
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// Picker-facing summary.
    pub fn entry(&self) -> FormatEntry {
        FormatEntry {
            id: self.id.clone(),
            label: self.label.clone(),
            width: self.width,
            height: self.height,
        }
    }
}

/// `{id, label, width, height}` row exposed to format pickers.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FormatEntry {
    /// Format id.
    pub id: String,
    /// Human label.
    pub label: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Ordered, validated collection of [`FormatSpec`]s.
#[derive(Clone, Debug, PartialEq)]
pub struct FormatRegistry {
    formats: Vec<FormatSpec>,
}

impl FormatRegistry {
    /// Validate and build a registry.
    ///
    /// Rejects an empty list, zero dimensions, non-finite or non-positive multipliers and
    /// duplicate ids.
    pub fn new(formats: Vec<FormatSpec>) -> AdrasterResult<Self> {
        if formats.is_empty() {
            return Err(AdrasterError::config("format registry must not be empty"));
        }
        let mut seen = HashSet::with_capacity(formats.len());
        for f in &formats {
            if f.id.trim().is_empty() {
                return Err(AdrasterError::config("format id must be non-empty"));
            }
            if f.width == 0 || f.height == 0 {
                return Err(AdrasterError::config(format!(
                    "format '{}' must have positive dimensions, got {}x{}",
                    f.id, f.width, f.height
                )));
            }
            if !f.font_scale.is_finite() || f.font_scale <= 0.0 {
                return Err(AdrasterError::config(format!(
                    "format '{}' font_scale must be finite and > 0, got {}",
                    f.id, f.font_scale
                )));
            }
            if !seen.insert(f.id.as_str()) {
                return Err(AdrasterError::config(format!(
                    "duplicate format id '{}'",
                    f.id
                )));
            }
        }
        Ok(Self { formats })
    }

    /// The five placements every creative ships in.
    pub fn builtin() -> Self {
        Self {
            formats: vec![
                FormatSpec::new("meta-feed", "Meta Feed", 1080, 1080, 1.0, LayoutVariant::Square),
                FormatSpec::new("portrait", "Portrait", 1080, 1350, 1.05, LayoutVariant::Portrait),
                FormatSpec::new("story", "Story", 1080, 1920, 1.1, LayoutVariant::Story),
                FormatSpec::new(
                    "landscape",
                    "Landscape",
                    1200,
                    628,
                    0.85,
                    LayoutVariant::Landscape,
                ),
                FormatSpec::new(
                    "youtube-thumb",
                    "YouTube Thumb",
                    1280,
                    720,
                    1.2,
                    LayoutVariant::WideThumbnail,
                ),
            ],
        }
    }

    /// Formats in registry order.
    pub fn formats(&self) -> &[FormatSpec] {
        &self.formats
    }

    /// Look up a format by id.
    pub fn get(&self, id: &str) -> Option<&FormatSpec> {
        self.formats.iter().find(|f| f.id == id)
    }

    /// Look up a format by id, failing with a configuration error.
    pub fn require(&self, id: &str) -> AdrasterResult<&FormatSpec> {
        self.get(id)
            .ok_or_else(|| AdrasterError::config(format!("unknown format id '{id}'")))
    }

    /// First entry with exactly this geometry.
    pub fn find_geometry(&self, width: u32, height: u32) -> Option<&FormatSpec> {
        self.formats
            .iter()
            .find(|f| f.width == width && f.height == height)
    }

    /// Default format (first entry).
    pub fn default_format(&self) -> &FormatSpec {
        &self.formats[0]
    }

    /// Picker rows in registry order.
    pub fn entries(&self) -> Vec<FormatEntry> {
        self.formats.iter().map(FormatSpec::entry).collect()
    }

    /// Number of formats.
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// Always `false`: registries are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/format/registry.rs"]
mod tests;
