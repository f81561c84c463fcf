use super::*;
use crate::layout::content::Stat;
use crate::surface::fonts::FontBook;
use crate::surface::images::ImageLibrary;
use crate::surface::taffy_bridge::{RealizeInputs, TaffyBridge};
use crate::surface::text::TextShaper;
use crate::format::registry::LayoutVariant;
use crate::typography::roles::{DISPLAY_FAMILY, Role, TEXT_FAMILY};

fn composer() -> SurfaceComposer {
    SurfaceComposer::new(
        FormatRegistry::builtin(),
        TypographyEngine::default(),
        ArrangementRegistry::builtin(),
        Palette::brand(),
    )
}

fn content() -> CreativeContent {
    CreativeContent {
        name: "Data Bootcamp".into(),
        headline: "Learn data".into(),
        stats: vec![
            Stat {
                value: "87%".into(),
                label: "placement".into(),
            },
            Stat {
                value: "12".into(),
                label: "weeks".into(),
            },
        ],
        cta: Some("Join".into()),
        ..CreativeContent::default()
    }
}

#[test]
fn composes_every_registry_format_with_its_resolution() {
    let c = composer();
    let registry = c.registry().clone();
    for f in registry.formats() {
        let s = c.compose(&content(), f).unwrap();
        assert_eq!(s.canvas, f.canvas());
        assert_eq!(s.resolution.layout_variant, f.layout_variant);
        assert_eq!(s.scale, c.typography().scale_for(f).unwrap());
        assert_eq!(s.background, c.palette().background);
    }
}

#[test]
fn required_families_cover_used_roles() {
    let c = composer();
    let f = c.registry().default_format().clone();
    let s = c.compose(&content(), &f).unwrap();
    assert_eq!(
        s.required_families(),
        vec![TEXT_FAMILY.to_owned(), DISPLAY_FAMILY.to_owned()]
    );
    assert_eq!(s.scale.size(Role::Headline), 76);
}

#[test]
fn realized_surfaces_stay_inside_canvas() {
    let c = composer();
    let registry = c.registry().clone();
    let mut fonts = FontBook::new();
    let mut shaper = TextShaper::new();
    let mut images = ImageLibrary::new(None);
    for f in registry.formats() {
        let s = c.compose(&content(), f).unwrap();
        let surface = TaffyBridge::new()
            .realize(
                &s.format_id,
                &s.tree,
                s.canvas,
                s.background,
                RealizeInputs {
                    scale: &s.scale,
                    fonts: &mut fonts,
                    shaper: &mut shaper,
                    images: &mut images,
                    placeholder: c.palette().placeholder,
                },
            )
            .unwrap();
        assert!(surface.fits_canvas(), "{}", f.id);
        assert!(surface.find("headline").is_some(), "{}", f.id);
    }
}

#[test]
fn ad_hoc_geometry_uses_heuristic_variant() {
    let mut c = composer();
    let spec = c.resolver_mut().spec_for(900, 1600);
    let s = c.compose(&content(), &spec).unwrap();
    assert_eq!(
        s.resolution.layout_variant,
        LayoutVariant::Story
    );
    assert_eq!(s.scale.size(Role::Headline), 84);
}

#[test]
fn formats_sharing_a_geometry_keep_their_own_scale_and_variant() {
    let registry = FormatRegistry::new(vec![
        FormatSpec::new("meta-feed", "Meta Feed", 1080, 1080, 1.0, LayoutVariant::Square),
        FormatSpec::new("ig-bold", "IG Bold", 1080, 1080, 1.5, LayoutVariant::WideThumbnail),
    ])
    .unwrap();
    let c = SurfaceComposer::new(
        registry.clone(),
        TypographyEngine::default(),
        ArrangementRegistry::builtin(),
        Palette::brand(),
    );

    let plain = c.compose(&content(), registry.require("meta-feed").unwrap()).unwrap();
    assert_eq!(plain.resolution.layout_variant, LayoutVariant::Square);
    assert_eq!(plain.scale.size(Role::Headline), 76);

    let bold = c.compose(&content(), registry.require("ig-bold").unwrap()).unwrap();
    assert_eq!(bold.resolution.layout_variant, LayoutVariant::WideThumbnail);
    assert_eq!(bold.resolution.font_scale, 1.5);
    assert_eq!(bold.scale.size(Role::Headline), 114);
    assert!(bold.tree.find("footer-bar").is_none());
}
