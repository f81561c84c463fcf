use super::*;
use crate::foundation::core::Canvas;
use crate::layout::content::Stat;
use crate::layout::palette::Palette;
use crate::layout::tree::{Extent, NodeKind};

fn full_content() -> CreativeContent {
    CreativeContent {
        name: "Bootcamp".into(),
        logo: Some("academy".into()),
        badge: Some("New".into()),
        headline: "Become a data analyst".into(),
        headline_accent: Some("in 12 weeks".into()),
        subheadline: Some("Live mentoring".into()),
        body: Some("SQL, Python and dashboards".into()),
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
        tags: vec!["SQL".into(), "Python".into()],
        image: Some("hero.png".into()),
        course_name: Some("Data Analytics".into()),
        trust_text: Some("Rated 4.9".into()),
        cta: Some("Enroll".into()),
        ..CreativeContent::default()
    }
}

#[test]
fn builtin_registry_is_total() {
    let reg = ArrangementRegistry::builtin();
    let palette = Palette::brand();
    let ctx = ArrangeCtx::new(Canvas::new(1080, 1080), &palette);
    for v in LayoutVariant::ALL {
        let tree = reg.select(v, &full_content(), &ctx);
        assert_eq!(tree.name, "root");
        assert_eq!(tree.style.width, Extent::Percent(1.0));
    }
}

#[test]
fn new_rejects_partial_and_duplicate_tables() {
    let err = ArrangementRegistry::new(vec![(LayoutVariant::Square, stacked_center as ArrangeFn)])
        .unwrap_err();
    assert!(err.to_string().contains("no arrangement registered"));

    let mut entries: Vec<(LayoutVariant, ArrangeFn)> = LayoutVariant::ALL
        .iter()
        .map(|&v| (v, stacked_center as ArrangeFn))
        .collect();
    assert!(ArrangementRegistry::new(entries.clone()).is_ok());
    entries.push((LayoutVariant::Story, side_by_side as ArrangeFn));
    assert!(ArrangementRegistry::new(entries).is_err());
}

#[test]
fn variants_differ_structurally() {
    let palette = Palette::brand();
    let content = full_content();
    let square = select_arrangement(
        LayoutVariant::Square,
        &content,
        &ArrangeCtx::new(Canvas::new(1080, 1080), &palette),
    );
    let landscape = select_arrangement(
        LayoutVariant::Landscape,
        &content,
        &ArrangeCtx::new(Canvas::new(1200, 628), &palette),
    );
    let thumb = select_arrangement(
        LayoutVariant::WideThumbnail,
        &content,
        &ArrangeCtx::new(Canvas::new(1280, 720), &palette),
    );

    assert!(square.find("image-panel").is_none());
    assert!(square.find("footer-bar").is_some());

    assert!(landscape.find("text-column").is_some());
    assert!(landscape.find("trust-text").is_none());

    assert!(thumb.find("footer-bar").is_none());
    assert_eq!(thumb.count("stat-card"), 1);
    assert!(thumb.find("tag-cloud").is_none());
}

#[test]
fn arrangements_tolerate_minimal_content() {
    let palette = Palette::brand();
    let minimal = CreativeContent {
        name: "x".into(),
        headline: "Only a headline".into(),
        ..CreativeContent::default()
    };
    for v in LayoutVariant::ALL {
        let tree = select_arrangement(
            v,
            &minimal,
            &ArrangeCtx::new(Canvas::new(1080, 1920), &palette),
        );
        assert!(tree.find("headline").is_some(), "{v}");
        assert!(tree.find("header-bar").is_none(), "{v}");
        assert!(tree.find("footer-bar").is_none(), "{v}");
    }
}

#[test]
fn arrangements_never_choose_colors_outside_palette() {
    let mut palette = Palette::brand();
    palette.headline = crate::foundation::core::Rgba8::hex(0x123456);
    let tree = select_arrangement(
        LayoutVariant::Portrait,
        &full_content(),
        &ArrangeCtx::new(Canvas::new(1080, 1350), &palette),
    );
    let NodeKind::Text(h) = &tree.find("headline").unwrap().kind else {
        panic!("headline is not text");
    };
    assert_eq!(h.color, palette.headline);
    assert!(h.uppercase);
}

#[test]
fn custom_arrangement_replaces_one_variant() {
    fn bare(content: &CreativeContent, _ctx: &ArrangeCtx<'_>) -> Node {
        Node::container(
            "root",
            BoxStyle::column(),
            vec![Node::text(
                "headline",
                crate::layout::tree::TextSpec {
                    role: crate::typography::roles::Role::Headline,
                    text: content.headline.clone(),
                    color: crate::layout::palette::brand::WHITE,
                    align: TextAlign::Start,
                    uppercase: false,
                },
            )],
        )
    }
    let palette = Palette::brand();
    let ctx = ArrangeCtx::new(Canvas::new(1080, 1080), &palette);
    let reg = ArrangementRegistry::builtin().with(LayoutVariant::Square, bare);
    assert_eq!(reg.select(LayoutVariant::Square, &full_content(), &ctx).children().len(), 1);
    assert!(
        reg.select(LayoutVariant::Portrait, &full_content(), &ctx)
            .find("footer-bar")
            .is_some()
    );
}

#[test]
fn missing_illustration_is_omitted_by_every_variant() {
    let palette = Palette::brand();
    for image in [None, Some("   ".to_owned())] {
        let content = CreativeContent {
            image,
            ..full_content()
        };
        for v in LayoutVariant::ALL {
            let tree = select_arrangement(
                v,
                &content,
                &ArrangeCtx::new(Canvas::new(1080, 1920), &palette),
            );
            assert!(tree.find("image-panel").is_none(), "{v}");
        }
    }

    let ctx = ArrangeCtx::new(Canvas::new(1200, 628), &palette);
    let with_image = side_by_side(&full_content(), &ctx);
    assert!(with_image.find("image-panel").is_some());
    let text_only = side_by_side(
        &CreativeContent {
            image: None,
            ..full_content()
        },
        &ctx,
    );
    assert_eq!(text_only.find("content").unwrap().children().len(), 1);
}
