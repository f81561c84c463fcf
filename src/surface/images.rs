use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{AdrasterError, AdrasterResult};

/// Decoded raster in premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Illustration ready for drawing.
#[derive(Clone, Debug)]
pub enum ImageAsset {
    /// Bitmap decoded from PNG or JPEG.
    Raster(PreparedImage),
    /// Parsed SVG, rasterized at draw size.
    Svg(Arc<usvg::Tree>),
}

/// Normalize a content image key into a relative path.
///
/// Uses `/` separators, drops `.` segments, and rejects absolute paths or `..`.
pub fn normalize_key(key: &str) -> AdrasterResult<String> {
    let s = key.trim().replace('\\', "/");
    if s.is_empty() {
        return Err(AdrasterError::config("image key must be non-empty"));
    }
    if s.starts_with('/') {
        return Err(AdrasterError::config(format!(
            "image key '{key}' must be relative"
        )));
    }
    let mut parts = Vec::new();
    for part in s.split('/') {
        match part {
            "" | "." => continue,
            ".." => {
                return Err(AdrasterError::config(format!(
                    "image key '{key}' must not contain '..'"
                )));
            }
            p => parts.push(p),
        }
    }
    if parts.is_empty() {
        return Err(AdrasterError::config(format!(
            "image key '{key}' has no file name"
        )));
    }
    Ok(parts.join("/"))
}

/// Decode PNG/JPEG bytes into premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> AdrasterResult<PreparedImage> {
    let rgba = image::load_from_memory(bytes)
        .context("decode image from memory")?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut data = rgba.into_raw();
    premultiply_in_place(&mut data);
    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(data),
    })
}

/// Parse SVG bytes.
pub fn parse_svg(bytes: &[u8]) -> AdrasterResult<Arc<usvg::Tree>> {
    let tree = usvg::Tree::from_data(bytes, &usvg::Options::default()).context("parse svg tree")?;
    Ok(Arc::new(tree))
}

/// Rasterize `tree` stretched to `width`x`height`, premultiplied RGBA8.
pub fn rasterize_svg(tree: &usvg::Tree, width: u32, height: u32) -> AdrasterResult<PreparedImage> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("failed to allocate {width}x{height} svg pixmap"))?;
    let size = tree.size();
    let xform = resvg::tiny_skia::Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(pixmap.data().to_vec()),
    })
}

pub(crate) fn premultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * a + 127) / 255) as u8;
        }
    }
}

/// Resolves content image keys under an assets root, caching each key's outcome.
///
/// A key that cannot be read or decoded resolves to `None` once and is logged; the arrangement
/// then shows a placeholder instead of failing the render.
#[derive(Debug, Default)]
pub struct ImageLibrary {
    root: Option<PathBuf>,
    cache: HashMap<String, Option<ImageAsset>>,
}

impl ImageLibrary {
    /// Library reading from `root`. `None` resolves nothing.
    pub fn new(root: Option<PathBuf>) -> Self {
        Self {
            root,
            cache: HashMap::new(),
        }
    }

    /// Assets root, if configured.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Register an in-memory asset under `key`.
    pub fn insert(&mut self, key: &str, asset: ImageAsset) {
        self.cache.insert(key.to_owned(), Some(asset));
    }

    /// Asset for `key`, loading it on first use.
    pub fn get(&mut self, key: &str) -> Option<ImageAsset> {
        if let Some(hit) = self.cache.get(key) {
            return hit.clone();
        }
        let loaded = match self.load(key) {
            Ok(a) => Some(a),
            Err(e) => {
                tracing::warn!(key, error = %e, "image unavailable, drawing placeholder");
                None
            }
        };
        self.cache.insert(key.to_owned(), loaded.clone());
        loaded
    }

    fn load(&self, key: &str) -> AdrasterResult<ImageAsset> {
        let rel = normalize_key(key)?;
        let root = self
            .root
            .as_ref()
            .ok_or_else(|| AdrasterError::config("no assets root configured"))?;
        let path = root.join(&rel);
        let bytes =
            std::fs::read(&path).with_context(|| format!("read image '{}'", path.display()))?;
        let is_svg = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
        if is_svg {
            Ok(ImageAsset::Svg(parse_svg(&bytes)?))
        } else {
            Ok(ImageAsset::Raster(decode_image(&bytes)?))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/images.rs"]
mod tests;
