use std::collections::HashMap;

use crate::format::registry::{FormatRegistry, FormatSpec, LayoutVariant};

/// Typography multiplier and arrangement chosen for a target geometry.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Resolution {
    /// Typography multiplier.
    pub font_scale: f64,
    /// Structural arrangement.
    pub layout_variant: LayoutVariant,
}

impl From<&FormatSpec> for Resolution {
    fn from(spec: &FormatSpec) -> Self {
        Self {
            font_scale: spec.font_scale,
            layout_variant: spec.layout_variant,
        }
    }
}

/// Aspect-ratio buckets used when a geometry is not in the registry.
///
/// Checked in order; a ratio lands in the first bucket whose upper bound it does not exceed, so
/// boundary values resolve to the lower bucket.
pub const FALLBACK_BUCKETS: [(f64, Resolution); 4] = [
    (
        0.65,
        Resolution {
            font_scale: 1.1,
            layout_variant: LayoutVariant::Story,
        },
    ),
    (
        0.9,
        Resolution {
            font_scale: 1.05,
            layout_variant: LayoutVariant::Portrait,
        },
    ),
    (
        1.1,
        Resolution {
            font_scale: 1.0,
            layout_variant: LayoutVariant::Square,
        },
    ),
    (
        1.6,
        Resolution {
            font_scale: 1.2,
            layout_variant: LayoutVariant::WideThumbnail,
        },
    ),
];

/// Bucket for ratios above the last bound.
pub const FALLBACK_WIDE: Resolution = Resolution {
    font_scale: 0.85,
    layout_variant: LayoutVariant::Landscape,
};

/// Heuristic resolution from aspect ratio alone. Total over every input.
///
/// Degenerate input is folded into the ordinary buckets: a zero height reads as an infinitely
/// wide ratio and `0x0` reads as square.
pub fn resolve_ratio(width: u32, height: u32) -> Resolution {
    if width == 0 && height == 0 {
        return FALLBACK_BUCKETS[2].1;
    }
    let ratio = f64::from(width) / f64::from(height);
    FALLBACK_BUCKETS
        .iter()
        .find(|(upper, _)| ratio <= *upper)
        .map(|(_, r)| *r)
        .unwrap_or(FALLBACK_WIDE)
}

/// Resolve `(width, height)` against `registry`: exact geometry match first, ratio buckets
/// otherwise. Never fails.
pub fn resolve(registry: &FormatRegistry, width: u32, height: u32) -> Resolution {
    match registry.find_geometry(width, height) {
        Some(spec) => Resolution::from(spec),
        None => resolve_ratio(width, height),
    }
}

/// Most geometries a [`FormatResolver`] remembers. Past this, new geometries are resolved
/// without being cached.
pub const MEMO_CAPACITY: usize = 256;

/// Memoizing wrapper around [`resolve`] for repeated batch calls.
#[derive(Clone, Debug)]
pub struct FormatResolver {
    registry: FormatRegistry,
    memo: HashMap<(u32, u32), Resolution>,
}

impl FormatResolver {
    /// Create a resolver over `registry`.
    pub fn new(registry: FormatRegistry) -> Self {
        Self {
            registry,
            memo: HashMap::new(),
        }
    }

    /// Registry the resolver matches against.
    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Resolve with memoization. Identical inputs always produce identical outputs.
    pub fn resolve(&mut self, width: u32, height: u32) -> Resolution {
        if let Some(r) = self.memo.get(&(width, height)) {
            return *r;
        }
        let r = resolve(&self.registry, width, height);
        if self.memo.len() < MEMO_CAPACITY {
            self.memo.insert((width, height), r);
        }
        r
    }

    /// Registry entry with this geometry, or an ad-hoc spec named `<w>x<h>` carrying the
    /// heuristic resolution.
    pub fn spec_for(&mut self, width: u32, height: u32) -> FormatSpec {
        if let Some(spec) = self.registry.find_geometry(width, height) {
            return spec.clone();
        }
        let r = self.resolve(width, height);
        FormatSpec::new(
            format!("{width}x{height}"),
            format!("Custom {width}x{height}"),
            width,
            height,
            r.font_scale,
            r.layout_variant,
        )
    }

    /// Number of memoized geometries.
    pub fn cached_len(&self) -> usize {
        self.memo.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/format/resolver.rs"]
mod tests;
