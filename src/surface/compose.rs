use crate::format::registry::{FormatRegistry, FormatSpec};
use crate::format::resolver::{FormatResolver, Resolution};
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::AdrasterResult;
use crate::layout::arrangements::ArrangementRegistry;
use crate::layout::content::CreativeContent;
use crate::layout::palette::Palette;
use crate::layout::primitives::ArrangeCtx;
use crate::layout::tree::Node;
use crate::typography::scale::{TypographyEngine, TypographyScale};

/// A creative composed for one format but not yet laid out.
#[derive(Clone, Debug)]
pub struct ComposedSurface {
    /// Format id.
    pub format_id: String,
    /// Format label.
    pub label: String,
    /// Exact target geometry.
    pub canvas: Canvas,
    /// Multiplier and variant the surface was composed with.
    pub resolution: Resolution,
    /// Typography for this format.
    pub scale: TypographyScale,
    /// Canvas fill.
    pub background: Rgba8,
    /// Visual tree from the selected arrangement.
    pub tree: Node,
}

impl ComposedSurface {
    /// Font families the surface needs before capture, sorted.
    pub fn required_families(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .tree
            .texts()
            .into_iter()
            .map(|t| self.scale.face(t.role).family.clone())
            .collect();
        out.sort();
        out.dedup();
        out
    }
}

/// Joins resolver, typography and arrangement output with creative content.
#[derive(Clone, Debug)]
pub struct SurfaceComposer {
    resolver: FormatResolver,
    typography: TypographyEngine,
    arrangements: ArrangementRegistry,
    palette: Palette,
}

impl SurfaceComposer {
    /// Composer over `registry`.
    pub fn new(
        registry: FormatRegistry,
        typography: TypographyEngine,
        arrangements: ArrangementRegistry,
        palette: Palette,
    ) -> Self {
        Self {
            resolver: FormatResolver::new(registry),
            typography,
            arrangements,
            palette,
        }
    }

    /// Registry formats are matched against.
    pub fn registry(&self) -> &FormatRegistry {
        self.resolver.registry()
    }

    /// Memoizing resolver.
    pub fn resolver_mut(&mut self) -> &mut FormatResolver {
        &mut self.resolver
    }

    /// Typography engine.
    pub fn typography(&self) -> &TypographyEngine {
        &self.typography
    }

    /// Swap in a new typography engine, e.g. after an override edit.
    pub fn set_typography(&mut self, typography: TypographyEngine) {
        self.typography = typography;
    }

    /// Palette injected into arrangements.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Compose `content` for `format`, using the format's own multiplier and variant. Raw
    /// geometries go through [`FormatResolver::spec_for`] first.
    pub fn compose(
        &self,
        content: &CreativeContent,
        format: &FormatSpec,
    ) -> AdrasterResult<ComposedSurface> {
        content.validate()?;
        let canvas = format.canvas();
        let resolution = Resolution::from(format);
        let scale = self.typography.scale_for(format)?;
        let ctx = ArrangeCtx::new(canvas, &self.palette);
        let tree = self
            .arrangements
            .select(resolution.layout_variant, content, &ctx);
        tracing::debug!(
            format = %format.id,
            variant = %resolution.layout_variant,
            font_scale = resolution.font_scale,
            "composed surface"
        );
        Ok(ComposedSurface {
            format_id: format.id.clone(),
            label: format.label.clone(),
            canvas,
            resolution,
            scale,
            background: self.palette.background,
            tree,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/compose.rs"]
mod tests;
