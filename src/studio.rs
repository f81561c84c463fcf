use crate::batch::orchestrator::{BatchProgress, BatchReport, CancelToken, run_batch};
use crate::capture::backend::{BackendKind, CaptureBackend, create_backend};
use crate::capture::pipeline::{CapturePipeline, CapturedImage};
use crate::capture::sink::{ArtifactSink, DirectorySink};
use crate::config::StudioConfig;
use crate::format::registry::{FormatEntry, FormatRegistry, FormatSpec};
use crate::format::resolver::Resolution;
use crate::foundation::error::AdrasterResult;
use crate::layout::arrangements::ArrangementRegistry;
use crate::layout::content::CreativeContent;
use crate::layout::palette::Palette;
use crate::surface::compose::SurfaceComposer;
use crate::surface::fonts::FontBook;
use crate::surface::images::ImageLibrary;

/// Format selection surface: the registry as a picker list plus the two export actions.
///
/// Construction runs every configuration check, so a `Studio` that exists can serve renders.
#[derive(Debug)]
pub struct Studio {
    pipeline: CapturePipeline,
    selected: String,
}

impl Studio {
    /// Studio with the CPU backend writing into `config.output.dir`.
    pub fn from_config(config: &StudioConfig) -> AdrasterResult<Self> {
        let sink = DirectorySink::new(config.output.dir.clone());
        Self::new(config, create_backend(BackendKind::Cpu), Box::new(sink))
    }

    /// Studio with an injected backend and sink.
    pub fn new(
        config: &StudioConfig,
        backend: Box<dyn CaptureBackend>,
        sink: Box<dyn ArtifactSink>,
    ) -> AdrasterResult<Self> {
        config.validate()?;
        config.check_fonts()?;
        let registry = config.registry()?;
        let typography = config.typography(&registry)?;
        let selected = registry.default_format().id.clone();

        let mut fonts = FontBook::new();
        fonts.spawn_loader(config.fonts.clone())?;
        let composer = SurfaceComposer::new(
            registry,
            typography,
            ArrangementRegistry::builtin(),
            Palette::brand(),
        );
        let pipeline = CapturePipeline::new(
            composer,
            fonts,
            ImageLibrary::new(config.assets_root.clone()),
            backend,
            sink,
            config.pipeline_options(),
        );
        tracing::debug!(formats = pipeline.composer().registry().len(), "studio ready");
        Ok(Self { pipeline, selected })
    }

    /// Format registry.
    pub fn registry(&self) -> &FormatRegistry {
        self.pipeline.composer().registry()
    }

    /// Picker list: `{id, label, width, height}` in registry order.
    pub fn entries(&self) -> Vec<FormatEntry> {
        self.registry().entries()
    }

    /// Currently selected format.
    pub fn current(&self) -> &FormatSpec {
        self.registry()
            .get(&self.selected)
            .unwrap_or_else(|| self.registry().default_format())
    }

    /// Select the format "export current" uses.
    pub fn select(&mut self, format_id: &str) -> AdrasterResult<()> {
        self.selected = self.registry().require(format_id)?.id.clone();
        Ok(())
    }

    /// Resolver output for an arbitrary geometry.
    pub fn resolve(&mut self, width: u32, height: u32) -> Resolution {
        self.pipeline.composer_mut().resolver_mut().resolve(width, height)
    }

    /// Pipeline, e.g. to register fonts from bytes.
    pub fn pipeline_mut(&mut self) -> &mut CapturePipeline {
        &mut self.pipeline
    }

    /// Export the selected format. Errors are returned for the caller to show and retry.
    pub fn export_current(&mut self, content: &CreativeContent) -> AdrasterResult<CapturedImage> {
        let format = self.current().clone();
        self.pipeline.run_job(content, &format)
    }

    /// Export one registry format by id.
    pub fn export_format(
        &mut self,
        content: &CreativeContent,
        format_id: &str,
    ) -> AdrasterResult<CapturedImage> {
        let format = self.registry().require(format_id)?.clone();
        self.pipeline.run_job(content, &format)
    }

    /// Export at an arbitrary geometry, using the registry entry when it matches exactly and
    /// the aspect-ratio heuristic otherwise.
    pub fn export_geometry(
        &mut self,
        content: &CreativeContent,
        width: u32,
        height: u32,
    ) -> AdrasterResult<CapturedImage> {
        let format = self
            .pipeline
            .composer_mut()
            .resolver_mut()
            .spec_for(width, height);
        self.pipeline.run_job(content, &format)
    }

    /// Export every registry format in order.
    pub fn export_all(
        &mut self,
        content: &CreativeContent,
        progress: impl FnMut(&BatchProgress),
        cancel: &CancelToken,
    ) -> BatchReport {
        let formats = self.registry().formats().to_vec();
        run_batch(&mut self.pipeline, content, &formats, progress, cancel)
    }
}

#[cfg(test)]
#[path = "../tests/unit/studio.rs"]
mod tests;
