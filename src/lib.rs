//! adraster turns one marketing creative into pixel-exact raster exports for every placement it
//! ships in.
//!
//! The pipeline runs in a fixed order:
//!
//! - A [`FormatRegistry`] lists the output geometries and a [`FormatResolver`] maps any geometry
//!   to a typography multiplier and a [`LayoutVariant`]
//! - A [`TypographyEngine`] derives per-role pixel sizes from a preset and the multiplier
//! - An [`ArrangementRegistry`] builds the visual tree for the variant from [`CreativeContent`]
//! - A [`CapturePipeline`] mounts, settles, lays out, rasterizes and encodes one format at a time
//! - [`run_batch`] sequences the pipeline over the registry, and [`Studio`] wraps it all for
//!   pickers and the `adraster` CLI
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod batch;
pub(crate) mod capture;
pub(crate) mod config;
pub(crate) mod format;
pub(crate) mod layout;
pub(crate) mod render;
pub(crate) mod studio;
pub(crate) mod surface;
pub(crate) mod typography;

pub use crate::foundation::core::{Canvas, Point, Rect, Rgba8, Vec2, export_filename, slugify};
pub use crate::foundation::error::{AdrasterError, AdrasterResult};

pub use crate::format::registry::{FormatEntry, FormatRegistry, FormatSpec, LayoutVariant};
pub use crate::format::resolver::{
    FormatResolver, MEMO_CAPACITY, Resolution, resolve, resolve_ratio,
};

pub use crate::typography::overrides::OverrideTable;
pub use crate::typography::presets::{DEFAULT_PRESET, PresetBook};
pub use crate::typography::roles::{
    DISPLAY_FAMILY, FontFace, Role, RoleFaces, RoleSizes, TEXT_FAMILY,
};
pub use crate::typography::scale::{TypographyEngine, TypographyScale, derive_scale};

pub use crate::layout::arrangements::{ArrangeFn, ArrangementRegistry, select_arrangement};
pub use crate::layout::content::{CreativeContent, Stat, Step};
pub use crate::layout::palette::{Palette, brand};
pub use crate::layout::primitives::{ArrangeCtx, grid_columns};
pub use crate::layout::tree::{
    Align, Border, BoxStyle, Direction, Edges, Extent, Justify, Node, NodeKind, TextAlign,
    TextSpec,
};

pub use crate::surface::compose::{ComposedSurface, SurfaceComposer};
pub use crate::surface::draw::{DrawItem, RenderSurface};
pub use crate::surface::fonts::{FontBook, FontEntry, SettleOutcome};
pub use crate::surface::host::SurfaceHost;
pub use crate::surface::images::{
    ImageAsset, ImageLibrary, PreparedImage, decode_image, normalize_key, parse_svg,
    rasterize_svg,
};
pub use crate::surface::text::{
    GlyphRun, PlacedGlyph, ShapedText, TextMetrics, TextShaper, estimate_metrics,
};

pub use crate::capture::backend::{
    BackendKind, CaptureBackend, CaptureGeometry, FrameRGBA, create_backend,
};
pub use crate::capture::encode::{
    DEFAULT_JPEG_QUALITY, Encoding, encode_frame, frame_digest, unpremultiply,
};
pub use crate::capture::pipeline::{
    CapturePipeline, CapturedImage, DEFAULT_SETTLE_TIMEOUT, JobPhase, PipelineOptions,
};
pub use crate::capture::sink::{ArtifactSink, DirectorySink, InMemorySink};
pub use crate::render::cpu::CpuCapture;

pub use crate::batch::orchestrator::{
    BatchExportState, BatchItem, BatchPhase, BatchProgress, BatchReport, CancelToken,
    ItemOutcome, ItemStatus, run_batch,
};
pub use crate::config::{DEFAULT_SETTLE_TIMEOUT_MS, OutputConfig, StudioConfig};
pub use crate::studio::Studio;
