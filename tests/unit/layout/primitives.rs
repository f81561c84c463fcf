use super::*;
use crate::layout::tree::NodeKind;

fn ctx(palette: &Palette) -> ArrangeCtx<'_> {
    ArrangeCtx::new(Canvas::new(1080, 1080), palette)
}

fn stats(n: usize) -> Vec<Stat> {
    (0..n)
        .map(|i| Stat {
            value: format!("{i}0%"),
            label: format!("stat {i}"),
        })
        .collect()
}

#[test]
fn column_rule_switches_above_four() {
    assert_eq!(grid_columns(1), GRID_COLUMNS_FEW);
    assert_eq!(grid_columns(4), GRID_COLUMNS_FEW);
    assert_eq!(grid_columns(5), GRID_COLUMNS_MANY);
    assert_eq!(grid_columns(6), GRID_COLUMNS_MANY);
}

#[test]
fn stat_grid_never_drops_cards() {
    let palette = Palette::brand();
    let ctx = ctx(&palette);
    for n in 1..=7 {
        let grid = stat_grid(&stats(n), &ctx, TextAlign::Center).unwrap();
        assert_eq!(grid.count("stat-card"), n);
        let cols = grid_columns(n);
        for row in grid.children() {
            assert_eq!(row.children().len(), cols, "n={n}");
        }
        assert_eq!(grid.children().len(), n.div_ceil(cols));
    }
    assert!(stat_grid(&[], &ctx, TextAlign::Center).is_none());
}

#[test]
fn six_stats_use_three_columns() {
    let palette = Palette::brand();
    let grid = stat_grid(&stats(6), &ctx(&palette), TextAlign::Center).unwrap();
    assert_eq!(grid.children().len(), 2);
    assert_eq!(grid.children()[0].children().len(), 3);
    assert_eq!(grid.count("spacer"), 0);
}

#[test]
fn footer_appends_arrow_and_compact_drops_trust() {
    let palette = Palette::brand();
    let ctx = ctx(&palette);
    let content = CreativeContent {
        course_name: Some("Data Analytics".into()),
        trust_text: Some("Rated 4.9".into()),
        cta: Some("Enroll now".into()),
        ..CreativeContent::default()
    };
    let full = footer_bar(&content, &ctx, false).unwrap();
    let cta = full.find("cta-text").unwrap();
    let NodeKind::Text(spec) = &cta.kind else {
        panic!("cta-text is not text");
    };
    assert_eq!(spec.text, "Enroll now \u{2192}");
    assert_eq!(spec.role, Role::Cta);
    assert_eq!(spec.color, palette.cta_text);
    assert!(full.find("trust-text").is_some());

    let compact = footer_bar(&content, &ctx, true).unwrap();
    assert!(compact.find("trust-text").is_none());
}

#[test]
fn optional_primitives_degrade_to_none() {
    let palette = Palette::brand();
    let ctx = ctx(&palette);
    let empty = CreativeContent::default();
    assert!(header_bar(&empty, &ctx).is_none());
    assert!(footer_bar(&empty, &ctx, false).is_none());
    assert!(tag_cloud(&["  ".to_owned()], &ctx, Justify::Start).is_none());
    assert!(step_grid(&[], &ctx).is_none());
}

#[test]
fn spacing_follows_design_unit() {
    let palette = Palette::brand();
    let half = ArrangeCtx::new(Canvas::new(540, 960), &palette);
    assert_eq!(half.unit, 0.5);
    assert_eq!(half.px(20.0), 10.0);
}
