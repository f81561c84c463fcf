use crate::foundation::core::Canvas;
use crate::foundation::error::AdrasterResult;
use crate::surface::draw::RenderSurface;

/// A captured frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha** unless `premultiplied` says otherwise.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// Exact region and naming for one capture.
///
/// Capture is always one canvas pixel per output pixel; there is no device pixel ratio.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureGeometry {
    /// Format being captured.
    pub format_id: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Name the output filename is derived from.
    pub target_name: String,
}

impl CaptureGeometry {
    /// Geometry for `canvas`.
    pub fn new(format_id: impl Into<String>, canvas: Canvas, target_name: impl Into<String>) -> Self {
        Self {
            format_id: format_id.into(),
            width: canvas.width,
            height: canvas.height,
            target_name: target_name.into(),
        }
    }

    /// Requested canvas.
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }
}

/// Capability that turns a realized surface into pixels.
///
/// The pipeline only depends on this trait, so a headless rasterizer, a test double, or any
/// other renderer can stand in without touching orchestration.
pub trait CaptureBackend {
    /// Rasterize `surface` into a frame of exactly `geometry` size.
    fn capture(
        &mut self,
        surface: &RenderSurface,
        geometry: &CaptureGeometry,
    ) -> AdrasterResult<FrameRGBA>;
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    #[default]
    Cpu,
}

/// Create a capture backend.
pub fn create_backend(kind: BackendKind) -> Box<dyn CaptureBackend> {
    match kind {
        BackendKind::Cpu => Box::new(crate::render::cpu::CpuCapture::new()),
    }
}
