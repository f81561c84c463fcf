use image::ImageEncoder;

use crate::capture::backend::FrameRGBA;
use crate::foundation::error::{AdrasterError, AdrasterResult};

/// Default JPEG quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Output file encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase", tag = "format")]
pub enum Encoding {
    /// Lossless PNG with alpha.
    #[default]
    Png,
    /// JPEG at `quality` (1..=100).
    Jpeg {
        /// Quality, 1..=100.
        #[serde(default = "default_quality")]
        quality: u8,
    },
}

fn default_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

impl Encoding {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg { .. } => "jpg",
        }
    }

    /// Reject out-of-range JPEG quality.
    pub fn validate(self) -> AdrasterResult<()> {
        match self {
            Self::Jpeg { quality } if !(1..=100).contains(&quality) => Err(AdrasterError::config(
                format!("jpeg quality must be in 1..=100, got {quality}"),
            )),
            _ => Ok(()),
        }
    }
}

/// Straight-alpha copy of `frame`'s pixels.
pub fn unpremultiply(frame: &FrameRGBA) -> Vec<u8> {
    let mut out = frame.data.clone();
    if !frame.premultiplied {
        return out;
    }
    for px in out.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}

/// Encode `frame` into file bytes.
pub fn encode_frame(frame: &FrameRGBA, encoding: Encoding) -> AdrasterResult<Vec<u8>> {
    let expected = (frame.width as usize)
        .saturating_mul(frame.height as usize)
        .saturating_mul(4);
    if frame.width == 0 || frame.height == 0 || frame.data.len() != expected {
        return Err(AdrasterError::encode(format!(
            "frame {}x{} has {} bytes, expected {expected}",
            frame.width,
            frame.height,
            frame.data.len()
        )));
    }
    let rgba = unpremultiply(frame);
    let mut out = Vec::new();
    match encoding {
        Encoding::Png => image::codecs::png::PngEncoder::new(&mut out)
            .write_image(
                &rgba,
                frame.width,
                frame.height,
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| AdrasterError::encode(format!("png: {e}")))?,
        Encoding::Jpeg { quality } => {
            let rgb: Vec<u8> = rgba
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality)
                .write_image(&rgb, frame.width, frame.height, image::ExtendedColorType::Rgb8)
                .map_err(|e| AdrasterError::encode(format!("jpeg: {e}")))?
        }
    }
    Ok(out)
}

/// Stable 64-bit digest of a frame's pixels.
pub fn frame_digest(frame: &FrameRGBA) -> u64 {
    xxhash_rust::xxh3::xxh3_64(&frame.data)
}

#[cfg(test)]
#[path = "../../tests/unit/capture/encode.rs"]
mod tests;
