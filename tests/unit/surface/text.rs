use super::*;
use crate::typography::roles::{Role, TEXT_FAMILY};

#[test]
fn estimate_is_single_line_without_limit() {
    let m = estimate_metrics("hello world", 20.0, None);
    assert_eq!(m.lines, 1);
    // 11 advances of 11px (10 letters plus one space)
    assert!((m.width - 11.0 * 11.0).abs() < 1e-3);
    assert!((m.height - 24.0).abs() < 1e-3);
}

#[test]
fn estimate_wraps_at_limit() {
    let m = estimate_metrics("aaaa bbbb cccc", 10.0, Some(50.0));
    // each word is 22px, two words plus a space are 49.5px
    assert_eq!(m.lines, 2);
    assert!(m.width <= 50.0);
}

#[test]
fn estimate_counts_explicit_newlines() {
    let m = estimate_metrics("a\nb\nc", 10.0, None);
    assert_eq!(m.lines, 3);
}

#[test]
fn long_word_gets_own_line() {
    let m = estimate_metrics("supercalifragilistic", 10.0, Some(20.0));
    assert_eq!(m.lines, 1);
    assert!(m.width > 20.0);
}

#[test]
fn unregistered_face_measures_by_estimate_and_is_not_shaped() {
    let mut book = FontBook::new();
    let mut shaper = TextShaper::new();
    let face = Role::Body.default_face();
    assert_eq!(face.family, TEXT_FAMILY);

    let m = shaper.measure(&mut book, "Learn SQL", &face, 30.0, Some(400.0));
    assert_eq!(m, estimate_metrics("Learn SQL", 30.0, Some(400.0)));
    assert!(
        shaper
            .shape(
                &mut book,
                "Learn SQL",
                &face,
                30.0,
                Rgba8::hex(0xffffff),
                TextAlign::Center,
                400.0
            )
            .is_none()
    );
}

#[test]
fn registered_face_shapes_into_glyph_runs() {
    let mut book = FontBook::new();
    let bytes = include_bytes!("../../data/fonts/DejaVuSansMono.ttf").to_vec();
    book.register_bytes(bytes).unwrap();
    let mut shaper = TextShaper::new();
    let face = FontFace::new("DejaVu Sans Mono", 400);
    let white = Rgba8::hex(0xffffff);

    let m = shaper.measure(&mut book, "Learn SQL", &face, 30.0, Some(400.0));
    assert_ne!(m, estimate_metrics("Learn SQL", 30.0, Some(400.0)));
    assert_eq!(m.lines, 1);

    let shaped = shaper
        .shape(&mut book, "Learn SQL", &face, 30.0, white, TextAlign::Start, 400.0)
        .unwrap();
    assert_eq!(shaped.metrics.lines, 1);
    let glyphs: usize = shaped.runs.iter().map(|r| r.glyphs.len()).sum();
    assert!(glyphs >= "LearnSQL".len(), "{glyphs}");
    assert!(shaped.runs.iter().all(|r| r.color == white && r.size == 30.0));

    let centered = shaper
        .shape(&mut book, "Learn SQL", &face, 30.0, white, TextAlign::Center, 400.0)
        .unwrap();
    let first = |s: &ShapedText| s.runs[0].glyphs[0].x;
    assert!(first(&centered) > first(&shaped));
}
