use std::path::PathBuf;
use std::time::Duration;

use crate::capture::backend::{CaptureBackend, CaptureGeometry, FrameRGBA};
use crate::capture::encode::{Encoding, encode_frame, frame_digest};
use crate::capture::sink::ArtifactSink;
use crate::format::registry::FormatSpec;
use crate::foundation::core::export_filename;
use crate::foundation::error::{AdrasterError, AdrasterResult};
use crate::layout::content::CreativeContent;
use crate::surface::compose::SurfaceComposer;
use crate::surface::draw::RenderSurface;
use crate::surface::fonts::{FontBook, SettleOutcome};
use crate::surface::host::SurfaceHost;
use crate::surface::images::ImageLibrary;
use crate::surface::taffy_bridge::{RealizeInputs, TaffyBridge};
use crate::surface::text::TextShaper;

/// Default bound on waiting for fonts.
pub const DEFAULT_SETTLE_TIMEOUT: Duration = Duration::from_millis(3000);

/// Lifecycle of one render job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobPhase {
    /// Surface composed and mounted at target geometry.
    Rendering,
    /// Waiting for fonts.
    Settling,
    /// Layout, rasterization and encoding.
    Capturing,
    /// Artifact produced and saved.
    Complete,
    /// Job failed; the surface has been released.
    Failed,
}

impl std::fmt::Display for JobPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Rendering => "rendering",
            Self::Settling => "settling",
            Self::Capturing => "capturing",
            Self::Complete => "complete",
            Self::Failed => "failed",
        })
    }
}

/// One exported image.
#[derive(Clone, Debug)]
pub struct CapturedImage {
    /// Format id.
    pub format_id: String,
    /// Format label.
    pub label: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Encoding of `bytes`.
    pub encoding: Encoding,
    /// `<slug>_<w>x<h>.<ext>`.
    pub filename: String,
    /// Encoded file bytes.
    pub bytes: Vec<u8>,
    /// xxh3 digest of the premultiplied pixels.
    pub digest: u64,
    /// How font settlement ended: settled, or timed out with text left unpainted.
    pub settle: SettleOutcome,
    /// Where the sink stored the file, if it writes to disk.
    pub path: Option<PathBuf>,
}

/// Knobs for [`CapturePipeline`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Output encoding.
    pub encoding: Encoding,
    /// Bound on font settlement.
    pub settle_timeout: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            encoding: Encoding::Png,
            settle_timeout: DEFAULT_SETTLE_TIMEOUT,
        }
    }
}

/// Render, settle and capture for one creative at one format, against a single render slot.
///
/// A settlement timeout is logged and the capture proceeds. Fonts that can no longer arrive fail
/// the job in [`JobPhase::Settling`].
pub struct CapturePipeline {
    composer: SurfaceComposer,
    fonts: FontBook,
    shaper: TextShaper,
    images: ImageLibrary,
    bridge: TaffyBridge,
    host: SurfaceHost,
    backend: Box<dyn CaptureBackend>,
    sink: Box<dyn ArtifactSink>,
    options: PipelineOptions,
}

impl std::fmt::Debug for CapturePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapturePipeline")
            .field("fonts", &self.fonts)
            .field("host", &self.host)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl CapturePipeline {
    /// Assemble a pipeline.
    pub fn new(
        composer: SurfaceComposer,
        fonts: FontBook,
        images: ImageLibrary,
        backend: Box<dyn CaptureBackend>,
        sink: Box<dyn ArtifactSink>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            composer,
            fonts,
            shaper: TextShaper::new(),
            images,
            bridge: TaffyBridge::new(),
            host: SurfaceHost::new(),
            backend,
            sink,
            options,
        }
    }

    /// Composer (registry, resolver, typography, arrangements).
    pub fn composer(&self) -> &SurfaceComposer {
        &self.composer
    }

    /// Mutable composer, e.g. to swap typography overrides between jobs.
    pub fn composer_mut(&mut self) -> &mut SurfaceComposer {
        &mut self.composer
    }

    /// Font book.
    pub fn fonts_mut(&mut self) -> &mut FontBook {
        &mut self.fonts
    }

    /// Options in effect.
    pub fn options(&self) -> PipelineOptions {
        self.options
    }

    /// `true` while a job holds the render slot. Always `false` between jobs.
    pub fn is_mounted(&self) -> bool {
        self.host.is_mounted()
    }

    /// Run one job end to end. The surface is released on every path before this returns.
    #[tracing::instrument(skip(self, content, format), fields(format = %format.id))]
    pub fn run_job(
        &mut self,
        content: &CreativeContent,
        format: &FormatSpec,
    ) -> AdrasterResult<CapturedImage> {
        let result = self.run_phases(content, format);
        self.host.release();
        match &result {
            Ok(img) => tracing::debug!(
                phase = %JobPhase::Complete,
                file = %img.filename,
                bytes = img.bytes.len(),
                "job finished"
            ),
            Err(e) => tracing::debug!(phase = %JobPhase::Failed, error = %e, "job finished"),
        }
        result
    }

    fn run_phases(
        &mut self,
        content: &CreativeContent,
        format: &FormatSpec,
    ) -> AdrasterResult<CapturedImage> {
        tracing::debug!(phase = %JobPhase::Rendering);
        let composed = self
            .composer
            .compose(content, format)
            .map_err(|e| e.into_capture(&format.id, JobPhase::Rendering))?;
        let geometry = CaptureGeometry::new(&format.id, composed.canvas, &content.name);
        let mounted = self.host.mount(composed)?;

        tracing::debug!(phase = %JobPhase::Settling);
        let settle = self
            .fonts
            .settle(&mounted.required_families(), self.options.settle_timeout);
        match &settle {
            SettleOutcome::Settled => {}
            SettleOutcome::TimedOut { missing } => tracing::warn!(
                format = %format.id,
                ?missing,
                timeout_ms = self.options.settle_timeout.as_millis() as u64,
                "font settlement timed out, capturing anyway"
            ),
            SettleOutcome::Incomplete { missing } => {
                return Err(AdrasterError::capture(
                    &format.id,
                    JobPhase::Settling,
                    format!("fonts never became available: {}", missing.join(", ")),
                ));
            }
        }

        tracing::debug!(phase = %JobPhase::Capturing);
        let surface = self
            .bridge
            .realize(
                &mounted.format_id,
                &mounted.tree,
                mounted.canvas,
                mounted.background,
                RealizeInputs {
                    scale: &mounted.scale,
                    fonts: &mut self.fonts,
                    shaper: &mut self.shaper,
                    images: &mut self.images,
                    placeholder: self.composer.palette().placeholder,
                },
            )
            .map_err(|e| e.into_capture(&format.id, JobPhase::Capturing))?;
        let label = mounted.label.clone();

        let mut image = self.capture(&surface, &geometry)?;
        image.label = label;
        image.settle = settle;
        image.path = self
            .sink
            .save(&image)
            .map_err(|e| e.into_capture(&format.id, JobPhase::Complete))?;
        Ok(image)
    }

    /// Capture a realized surface at exactly `geometry` and encode it.
    ///
    /// The surface must already be laid out at `geometry`; nothing is resized or cropped. A
    /// backend that returns no pixels or the wrong size is a capture error.
    pub fn capture(
        &mut self,
        surface: &RenderSurface,
        geometry: &CaptureGeometry,
    ) -> AdrasterResult<CapturedImage> {
        let fail = |msg: String| {
            AdrasterError::capture(geometry.format_id.clone(), JobPhase::Capturing, msg)
        };
        if surface.canvas != geometry.canvas() {
            return Err(fail(format!(
                "surface is {}x{} but capture requested {}x{}",
                surface.canvas.width, surface.canvas.height, geometry.width, geometry.height
            )));
        }

        let frame: FrameRGBA = self
            .backend
            .capture(surface, geometry)
            .map_err(|e| e.into_capture(&geometry.format_id, JobPhase::Capturing))?;
        if frame.data.is_empty() {
            return Err(fail("capture returned no data".to_owned()));
        }
        if frame.width != geometry.width || frame.height != geometry.height {
            return Err(fail(format!(
                "capture returned {}x{}, expected {}x{}",
                frame.width, frame.height, geometry.width, geometry.height
            )));
        }

        let encoding = self.options.encoding;
        let bytes = encode_frame(&frame, encoding)
            .map_err(|e| e.into_capture(&geometry.format_id, JobPhase::Capturing))?;
        if bytes.is_empty() {
            return Err(fail("encoder produced an empty file".to_owned()));
        }

        Ok(CapturedImage {
            format_id: geometry.format_id.clone(),
            label: geometry.format_id.clone(),
            width: frame.width,
            height: frame.height,
            encoding,
            filename: export_filename(
                &geometry.target_name,
                geometry.canvas(),
                encoding.extension(),
            ),
            digest: frame_digest(&frame),
            bytes,
            settle: SettleOutcome::Settled,
            path: None,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/pipeline.rs"]
mod tests;
