use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Context;

use crate::capture::pipeline::CapturedImage;
use crate::foundation::error::AdrasterResult;

/// Receives exported images in export order.
pub trait ArtifactSink {
    /// Store `image`. Returns the file path when the sink writes to disk.
    fn save(&mut self, image: &CapturedImage) -> AdrasterResult<Option<PathBuf>>;
}

/// Writes each image to `<dir>/<filename>`, creating the directory on first use.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Sink writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for DirectorySink {
    fn save(&mut self, image: &CapturedImage) -> AdrasterResult<Option<PathBuf>> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        let path = self.dir.join(&image.filename);
        std::fs::write(&path, &image.bytes)
            .with_context(|| format!("write '{}'", path.display()))?;
        tracing::info!(path = %path.display(), "wrote");
        Ok(Some(path))
    }
}

/// Keeps images in memory. Clones share the same storage.
#[derive(Clone, Debug, Default)]
pub struct InMemorySink {
    saved: Arc<Mutex<Vec<CapturedImage>>>,
}

impl InMemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of saved images, in save order.
    pub fn saved(&self) -> Vec<CapturedImage> {
        match self.saved.lock() {
            Ok(g) => g.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Filenames in save order.
    pub fn filenames(&self) -> Vec<String> {
        self.saved().into_iter().map(|i| i.filename).collect()
    }
}

impl ArtifactSink for InMemorySink {
    fn save(&mut self, image: &CapturedImage) -> AdrasterResult<Option<PathBuf>> {
        let mut g = match self.saved.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        g.push(image.clone());
        Ok(None)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/sink.rs"]
mod tests;
