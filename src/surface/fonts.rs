use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::foundation::error::{AdrasterError, AdrasterResult};

/// One registered face: weight plus the bytes the rasterizer paints glyphs from.
#[derive(Clone, Debug)]
pub struct FontEntry {
    /// Weight reported by the font.
    pub weight: u16,
    /// Paintable font data.
    pub data: vello_cpu::peniko::FontData,
}

/// Result of waiting for fonts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SettleOutcome {
    /// Every required family is available.
    Settled,
    /// The wait hit its bound with families still missing.
    TimedOut {
        /// Families not yet available, sorted.
        missing: Vec<String>,
    },
    /// Loading finished but some families never arrived.
    Incomplete {
        /// Families that will not become available, sorted.
        missing: Vec<String>,
    },
}

impl SettleOutcome {
    /// `true` for [`SettleOutcome::Settled`].
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Settled)
    }
}

enum LoaderMsg {
    Loaded { source: PathBuf, bytes: Vec<u8> },
    Failed { source: PathBuf, message: String },
    Done,
}

struct Loader {
    rx: Receiver<LoaderMsg>,
    handle: Option<JoinHandle<()>>,
}

/// Registered font families, plus an optional background loader still delivering files.
///
/// Registration shapes through `parley`, which owns family naming; the book keeps the raw bytes
/// per family and weight so painted glyphs come from the same face that was measured.
pub struct FontBook {
    pub(crate) font_ctx: parley::FontContext,
    families: BTreeMap<String, Vec<FontEntry>>,
    loader: Option<Loader>,
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("families", &self.families.keys().collect::<Vec<_>>())
            .field("loading", &self.is_loading())
            .finish()
    }
}

impl FontBook {
    /// Empty book.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            families: BTreeMap::new(),
            loader: None,
        }
    }

    /// Register font bytes now. Returns the family names the file provides.
    pub fn register_bytes(&mut self, bytes: Vec<u8>) -> AdrasterResult<Vec<String>> {
        let registered = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        if registered.is_empty() {
            return Err(AdrasterError::config("no font families found in font data"));
        }
        let data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
        let mut names = Vec::with_capacity(registered.len());
        for (family_id, infos) in registered {
            let name = self
                .font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| AdrasterError::config("registered font family has no name"))?
                .to_string();
            let weight = infos
                .first()
                .map(|i| i.weight().value().round() as u16)
                .unwrap_or(400);
            let faces = self.families.entry(name.clone()).or_default();
            faces.retain(|f| f.weight != weight);
            faces.push(FontEntry {
                weight,
                data: data.clone(),
            });
            tracing::debug!(family = %name, weight, "registered font");
            names.push(name);
        }
        Ok(names)
    }

    /// Start reading `paths` on a background thread. Files arrive as [`FontBook::settle`] drains
    /// them. An earlier loader that has not finished is dropped; its thread stops at its next send.
    pub fn spawn_loader(&mut self, paths: Vec<PathBuf>) -> AdrasterResult<()> {
        self.loader = None;
        let (tx, rx) = std::sync::mpsc::channel();
        let handle = std::thread::Builder::new()
            .name("adraster-font-loader".to_owned())
            .spawn(move || {
                for source in paths {
                    let msg = match std::fs::read(&source) {
                        Ok(bytes) => LoaderMsg::Loaded { source, bytes },
                        Err(e) => LoaderMsg::Failed {
                            source,
                            message: e.to_string(),
                        },
                    };
                    if tx.send(msg).is_err() {
                        return;
                    }
                }
                let _ = tx.send(LoaderMsg::Done);
            })
            .map_err(|e| anyhow::anyhow!("spawn font loader: {e}"))?;
        self.loader = Some(Loader {
            rx,
            handle: Some(handle),
        });
        Ok(())
    }

    /// `true` while a background loader may still deliver fonts.
    pub fn is_loading(&self) -> bool {
        self.loader.is_some()
    }

    /// `true` when `family` has at least one face.
    pub fn has_family(&self, family: &str) -> bool {
        self.families.contains_key(family)
    }

    /// Registered family names, sorted.
    pub fn families(&self) -> Vec<&str> {
        self.families.keys().map(String::as_str).collect()
    }

    /// Face of `family` with the weight closest to `weight`.
    pub fn face(&self, family: &str, weight: u16) -> Option<&FontEntry> {
        self.families
            .get(family)?
            .iter()
            .min_by_key(|f| (i32::from(f.weight) - i32::from(weight)).abs())
    }

    /// Wait until every family in `required` is registered, the loader finishes, or `timeout`
    /// elapses. Never blocks longer than `timeout`.
    pub fn settle(&mut self, required: &[String], timeout: Duration) -> SettleOutcome {
        let deadline = Instant::now() + timeout;
        loop {
            let missing = self.missing(required);
            if missing.is_empty() {
                return SettleOutcome::Settled;
            }
            let Some(loader) = self.loader.as_ref() else {
                return SettleOutcome::Incomplete { missing };
            };
            let now = Instant::now();
            let msg = if now >= deadline {
                match loader.rx.try_recv() {
                    Ok(m) => m,
                    Err(TryRecvError::Empty) => return SettleOutcome::TimedOut { missing },
                    Err(TryRecvError::Disconnected) => LoaderMsg::Done,
                }
            } else {
                match loader.rx.recv_timeout(deadline - now) {
                    Ok(m) => m,
                    Err(RecvTimeoutError::Timeout) => {
                        return SettleOutcome::TimedOut { missing };
                    }
                    Err(RecvTimeoutError::Disconnected) => LoaderMsg::Done,
                }
            };
            self.apply(msg);
        }
    }

    /// Drain whatever the loader has already delivered without waiting.
    pub fn poll(&mut self) {
        while let Some(loader) = self.loader.as_ref() {
            let msg = match loader.rx.try_recv() {
                Ok(m) => m,
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => LoaderMsg::Done,
            };
            self.apply(msg);
        }
    }

    fn apply(&mut self, msg: LoaderMsg) {
        match msg {
            LoaderMsg::Loaded { source, bytes } => {
                if let Err(e) = self.register_bytes(bytes) {
                    tracing::warn!(path = %source.display(), error = %e, "font rejected");
                }
            }
            LoaderMsg::Failed { source, message } => {
                tracing::warn!(path = %source.display(), error = %message, "font failed to load");
            }
            LoaderMsg::Done => self.finish_loader(),
        }
    }

    /// The loader sent its last message; join it so no thread outlives loading.
    fn finish_loader(&mut self) {
        if let Some(mut loader) = self.loader.take()
            && let Some(h) = loader.handle.take()
        {
            let _ = h.join();
        }
    }

    fn missing(&self, required: &[String]) -> Vec<String> {
        let mut out: Vec<String> = required
            .iter()
            .filter(|f| !self.has_family(f))
            .cloned()
            .collect();
        out.sort();
        out.dedup();
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/fonts.rs"]
mod tests;
