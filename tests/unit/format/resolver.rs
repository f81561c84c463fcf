use super::*;
use crate::format::registry::FormatSpec;

#[test]
fn exact_match_returns_registry_values_verbatim() {
    let reg = FormatRegistry::builtin();
    for spec in reg.formats() {
        let r = resolve(&reg, spec.width, spec.height);
        assert_eq!(r.font_scale, spec.font_scale, "{}", spec.id);
        assert_eq!(r.layout_variant, spec.layout_variant, "{}", spec.id);
    }
}

#[test]
fn exact_match_beats_ratio_heuristic() {
    // 1280x720 is ~1.78, which the heuristic would call landscape.
    let reg = FormatRegistry::builtin();
    assert_eq!(
        resolve(&reg, 1280, 720).layout_variant,
        LayoutVariant::WideThumbnail
    );
    assert_eq!(resolve_ratio(1280, 720).layout_variant, LayoutVariant::Landscape);
}

#[test]
fn boundaries_resolve_to_lower_bucket() {
    assert_eq!(resolve_ratio(65, 100).layout_variant, LayoutVariant::Story);
    assert_eq!(resolve_ratio(90, 100).layout_variant, LayoutVariant::Portrait);
    assert_eq!(resolve_ratio(110, 100).layout_variant, LayoutVariant::Square);
    assert_eq!(resolve_ratio(160, 100).layout_variant, LayoutVariant::WideThumbnail);
    assert_eq!(resolve_ratio(161, 100).layout_variant, LayoutVariant::Landscape);
    for _ in 0..3 {
        assert_eq!(resolve_ratio(160, 100), resolve_ratio(160, 100));
    }
}

#[test]
fn degenerate_geometry_is_still_resolved() {
    assert_eq!(resolve_ratio(0, 10).layout_variant, LayoutVariant::Story);
    assert_eq!(resolve_ratio(10, 0).layout_variant, LayoutVariant::Landscape);
    assert_eq!(resolve_ratio(0, 0).layout_variant, LayoutVariant::Square);
}

#[test]
fn scenario_from_two_entry_registry() {
    let reg = FormatRegistry::new(vec![
        FormatSpec::new("meta-feed", "Meta Feed", 1080, 1080, 1.0, LayoutVariant::Square),
        FormatSpec::new("story", "Story", 1080, 1920, 1.1, LayoutVariant::Story),
    ])
    .unwrap();

    let square = resolve(&reg, 1080, 1080);
    assert_eq!(square.font_scale, 1.0);
    assert_eq!(square.layout_variant, LayoutVariant::Square);

    assert_eq!(resolve(&reg, 900, 1600).layout_variant, LayoutVariant::Story);
    assert_eq!(resolve(&reg, 1200, 628).layout_variant, LayoutVariant::Landscape);
}

#[test]
fn memoized_resolver_matches_pure_function() {
    let mut resolver = FormatResolver::new(FormatRegistry::builtin());
    let a = resolver.resolve(777, 1000);
    let b = resolver.resolve(777, 1000);
    assert_eq!(a, b);
    assert_eq!(a, resolve(resolver.registry(), 777, 1000));
    assert_eq!(resolver.cached_len(), 1);
}

#[test]
fn spec_for_prefers_registry_entry() {
    let mut resolver = FormatResolver::new(FormatRegistry::builtin());
    assert_eq!(resolver.spec_for(1080, 1350).id, "portrait");

    let custom = resolver.spec_for(600, 300);
    assert_eq!(custom.id, "600x300");
    assert_eq!(custom.layout_variant, LayoutVariant::Landscape);
    assert_eq!(custom.font_scale, 0.85);
}

#[test]
fn memo_stops_growing_at_capacity() {
    let mut resolver = FormatResolver::new(FormatRegistry::builtin());
    let n = MEMO_CAPACITY as u32 + 50;
    for w in 1..=n {
        assert_eq!(resolver.resolve(w, 1000), resolve_ratio(w, 1000));
    }
    assert_eq!(resolver.cached_len(), MEMO_CAPACITY);
    assert_eq!(resolver.resolve(n, 1000), resolve_ratio(n, 1000));
    assert_eq!(resolver.resolve(1, 1000), resolve_ratio(1, 1000));
    assert_eq!(resolver.cached_len(), MEMO_CAPACITY);
}
