use std::time::Duration;

use super::*;
use crate::capture::backend::{CaptureBackend, CaptureGeometry, FrameRGBA};
use crate::capture::encode::Encoding;
use crate::capture::pipeline::PipelineOptions;
use crate::capture::sink::InMemorySink;
use crate::format::registry::FormatRegistry;
use crate::foundation::error::AdrasterResult;
use crate::layout::arrangements::ArrangementRegistry;
use crate::layout::palette::Palette;
use crate::surface::compose::SurfaceComposer;
use crate::surface::draw::RenderSurface;
use crate::surface::fonts::FontBook;
use crate::surface::images::ImageLibrary;
use crate::typography::overrides::OverrideTable;
use crate::typography::presets::{DEFAULT_PRESET, PresetBook};
use crate::typography::roles::RoleFaces;
use crate::typography::scale::TypographyEngine;

/// Solid frames at the requested size; fails for one format id.
struct SolidBackend {
    fail_for: Option<&'static str>,
}

impl CaptureBackend for SolidBackend {
    fn capture(
        &mut self,
        _surface: &RenderSurface,
        geometry: &CaptureGeometry,
    ) -> AdrasterResult<FrameRGBA> {
        if self.fail_for == Some(geometry.format_id.as_str()) {
            return Err(AdrasterError::encode("backend returned nothing"));
        }
        Ok(FrameRGBA {
            width: geometry.width,
            height: geometry.height,
            data: vec![255; (geometry.width * geometry.height * 4) as usize],
            premultiplied: true,
        })
    }
}

fn pipeline(fail_for: Option<&'static str>, sink: InMemorySink) -> CapturePipeline {
    let typography = TypographyEngine::new(
        PresetBook::builtin(),
        DEFAULT_PRESET,
        RoleFaces::uniform("DejaVu Sans Mono"),
        OverrideTable::new(),
    )
    .unwrap();
    let mut fonts = FontBook::new();
    fonts
        .register_bytes(include_bytes!("../../data/fonts/DejaVuSansMono.ttf").to_vec())
        .unwrap();
    CapturePipeline::new(
        SurfaceComposer::new(
            FormatRegistry::builtin(),
            typography,
            ArrangementRegistry::builtin(),
            Palette::brand(),
        ),
        fonts,
        ImageLibrary::new(None),
        Box::new(SolidBackend { fail_for }),
        Box::new(sink),
        PipelineOptions {
            encoding: Encoding::Png,
            settle_timeout: Duration::from_millis(10),
        },
    )
}

fn content() -> CreativeContent {
    CreativeContent {
        name: "Batch Test".into(),
        headline: "Hello".into(),
        ..CreativeContent::default()
    }
}

#[test]
fn state_starts_idle_and_pending() {
    let state = BatchExportState::new(FormatRegistry::builtin().formats().to_vec());
    assert_eq!(state.phase(), BatchPhase::Idle);
    assert_eq!(state.cursor(), 0);
    assert_eq!(state.formats().len(), 5);
    assert!(state.statuses().iter().all(|s| *s == ItemStatus::Pending));
}

#[test]
fn failure_is_recorded_and_batch_continues() {
    let sink = InMemorySink::new();
    let mut p = pipeline(Some("story"), sink.clone());
    let formats = FormatRegistry::builtin().formats().to_vec();
    let report = run_batch(&mut p, &content(), &formats, |_| {}, &CancelToken::new());

    assert_eq!(report.phase, BatchPhase::Completed);
    assert_eq!(report.succeeded(), 4);
    assert_eq!(report.failed(), 1);
    assert!(!report.is_clean());
    let ids: Vec<_> = report.items.iter().map(|i| i.format_id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["meta-feed", "portrait", "story", "landscape", "youtube-thumb"]
    );
    match &report.items[2].outcome {
        ItemOutcome::Failed(e) => assert_eq!(e.format_id(), Some("story")),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(sink.saved().len(), 4);
    assert!(!p.is_mounted());
}

#[test]
fn progress_reports_start_and_end_of_each_item() {
    let mut p = pipeline(None, InMemorySink::new());
    let formats = FormatRegistry::builtin().formats()[..2].to_vec();
    let mut seen = Vec::new();
    let report = run_batch(
        &mut p,
        &content(),
        &formats,
        |ev| seen.push((ev.index, ev.total, ev.label.clone(), ev.status)),
        &CancelToken::new(),
    );
    assert!(report.is_clean());
    assert_eq!(
        seen,
        vec![
            (0, 2, "Meta Feed".to_owned(), ItemStatus::InProgress),
            (0, 2, "Meta Feed".to_owned(), ItemStatus::Done),
            (1, 2, "Portrait".to_owned(), ItemStatus::InProgress),
            (1, 2, "Portrait".to_owned(), ItemStatus::Done),
        ]
    );
}

#[test]
fn cancel_after_second_item_skips_the_rest() {
    let sink = InMemorySink::new();
    let mut p = pipeline(None, sink.clone());
    let formats = FormatRegistry::builtin().formats().to_vec();
    let cancel = CancelToken::new();
    let token = cancel.clone();
    let report = run_batch(
        &mut p,
        &content(),
        &formats,
        |ev| {
            if ev.index == 1 && ev.status == ItemStatus::Done {
                token.cancel();
            }
        },
        &cancel,
    );

    assert_eq!(report.phase, BatchPhase::Cancelled);
    assert_eq!(report.items.len(), 5);
    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.skipped(), 3);
    assert_eq!(sink.saved().len(), 2);
    assert!(!p.is_mounted());
}

#[test]
fn cancelled_before_start_runs_nothing() {
    let mut p = pipeline(None, InMemorySink::new());
    let cancel = CancelToken::new();
    cancel.cancel();
    let formats = FormatRegistry::builtin().formats().to_vec();
    let mut calls = 0;
    let report = run_batch(&mut p, &content(), &formats, |_| calls += 1, &cancel);
    assert_eq!(calls, 0);
    assert_eq!(report.phase, BatchPhase::Cancelled);
    assert_eq!(report.skipped(), 5);
}

#[test]
fn empty_batch_completes() {
    let mut p = pipeline(None, InMemorySink::new());
    let report = run_batch(&mut p, &content(), &[], |_| {}, &CancelToken::new());
    assert_eq!(report.phase, BatchPhase::Completed);
    assert!(report.items.is_empty());
    assert!(report.is_clean());
}
