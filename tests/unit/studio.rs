use super::*;
use crate::capture::sink::InMemorySink;
use crate::format::registry::LayoutVariant;
use crate::foundation::error::AdrasterError;
use crate::typography::roles::{FontFace, Role};

fn mono_config() -> StudioConfig {
    StudioConfig {
        faces: Role::ALL
            .iter()
            .map(|&r| (r, FontFace::new("DejaVu Sans Mono", r.default_face().weight)))
            .collect(),
        fonts: vec![
            std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("tests/data/fonts/DejaVuSansMono.ttf"),
        ],
        settle_timeout_ms: 10_000,
        ..StudioConfig::default()
    }
}

fn studio(sink: InMemorySink) -> Studio {
    Studio::new(&mono_config(), create_backend(BackendKind::Cpu), Box::new(sink)).unwrap()
}

fn content() -> CreativeContent {
    CreativeContent {
        name: "Studio Check".into(),
        headline: "Hi".into(),
        ..CreativeContent::default()
    }
}

#[test]
fn entries_follow_registry_order() {
    let s = studio(InMemorySink::new());
    let ids: Vec<_> = s.entries().into_iter().map(|e| e.id).collect();
    assert_eq!(
        ids,
        vec!["meta-feed", "portrait", "story", "landscape", "youtube-thumb"]
    );
    assert_eq!(s.current().id, "meta-feed");
}

#[test]
fn select_rejects_unknown_ids() {
    let mut s = studio(InMemorySink::new());
    s.select("landscape").unwrap();
    assert_eq!(s.current().id, "landscape");
    assert!(matches!(s.select("banner"), Err(AdrasterError::Config(_))));
    assert_eq!(s.current().id, "landscape");
}

#[test]
fn export_current_writes_selected_geometry() {
    let sink = InMemorySink::new();
    let mut s = studio(sink.clone());
    s.select("landscape").unwrap();
    let img = s.export_current(&content()).unwrap();
    assert_eq!((img.width, img.height), (1200, 628));
    assert!(img.settle.is_settled());
    assert_eq!(sink.filenames(), vec!["studio-check_1200x628.png"]);
}

#[test]
fn export_geometry_handles_unregistered_sizes() {
    let mut s = studio(InMemorySink::new());
    assert_eq!(s.resolve(900, 1600).layout_variant, LayoutVariant::Story);
    let img = s.export_geometry(&content(), 90, 160).unwrap();
    assert_eq!((img.width, img.height), (90, 160));
    assert_eq!(img.format_id, "90x160");
}

#[test]
fn invalid_config_never_builds_a_studio() {
    let config = StudioConfig {
        preset: "nope".into(),
        ..mono_config()
    };
    let err = Studio::new(
        &config,
        create_backend(BackendKind::Cpu),
        Box::new(InMemorySink::new()),
    )
    .unwrap_err();
    assert!(matches!(err, AdrasterError::Config(_)));
}

#[test]
fn studio_needs_font_files_at_startup() {
    let build = |config: &StudioConfig| {
        Studio::new(
            config,
            create_backend(BackendKind::Cpu),
            Box::new(InMemorySink::new()),
        )
    };

    let err = build(&StudioConfig::default()).unwrap_err();
    assert!(matches!(err, AdrasterError::Config(_)));
    assert!(err.to_string().contains("Kanit"), "{err}");
    assert!(err.to_string().contains("Saira Condensed"), "{err}");

    let config = StudioConfig {
        fonts: vec!["/definitely/not/here.ttf".into()],
        ..mono_config()
    };
    let err = build(&config).unwrap_err();
    assert!(err.to_string().contains("here.ttf"), "{err}");
}

#[test]
fn font_files_without_the_configured_family_fail_the_job() {
    let config = StudioConfig {
        faces: Default::default(),
        ..mono_config()
    };
    let sink = InMemorySink::new();
    let mut s = Studio::new(&config, create_backend(BackendKind::Cpu), Box::new(sink.clone()))
        .unwrap();
    let err = s.export_current(&content()).unwrap_err();
    assert_eq!(err.phase(), Some(crate::capture::pipeline::JobPhase::Settling));
    assert!(err.to_string().contains("Saira Condensed"), "{err}");
    assert!(sink.saved().is_empty());
}
