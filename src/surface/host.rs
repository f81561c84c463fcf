use crate::capture::pipeline::JobPhase;
use crate::foundation::error::{AdrasterError, AdrasterResult};
use crate::surface::compose::ComposedSurface;

/// The single render slot. At most one surface is mounted at a time.
#[derive(Debug, Default)]
pub struct SurfaceHost {
    slot: Option<ComposedSurface>,
}

impl SurfaceHost {
    /// Empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `surface`. Fails while another surface holds the slot.
    #[tracing::instrument(skip(self, surface), fields(format = %surface.format_id))]
    pub fn mount(&mut self, surface: ComposedSurface) -> AdrasterResult<&ComposedSurface> {
        if let Some(current) = &self.slot {
            return Err(AdrasterError::capture(
                surface.format_id,
                JobPhase::Rendering,
                format!(
                    "render surface is still mounted for '{}'",
                    current.format_id
                ),
            ));
        }
        tracing::debug!("surface mounted");
        Ok(self.slot.insert(surface))
    }

    /// Mounted surface, if any.
    pub fn current(&self) -> Option<&ComposedSurface> {
        self.slot.as_ref()
    }

    /// `true` while a surface holds the slot.
    pub fn is_mounted(&self) -> bool {
        self.slot.is_some()
    }

    /// Unmount and hand back the surface. Idempotent.
    pub fn release(&mut self) -> Option<ComposedSurface> {
        let out = self.slot.take();
        if let Some(s) = &out {
            tracing::debug!(format = %s.format_id, "surface released");
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/host.rs"]
mod tests;
