use super::*;

#[test]
fn builtin_registry_is_valid_and_ordered() {
    let builtin = FormatRegistry::builtin();
    let revalidated = FormatRegistry::new(builtin.formats().to_vec()).unwrap();
    assert_eq!(builtin, revalidated);

    let ids: Vec<_> = builtin.entries().into_iter().map(|e| e.id).collect();
    assert_eq!(
        ids,
        ["meta-feed", "portrait", "story", "landscape", "youtube-thumb"]
    );
    assert_eq!(builtin.default_format().id, "meta-feed");
}

#[test]
fn duplicate_ids_are_rejected() {
    let f = FormatSpec::new("a", "A", 10, 10, 1.0, LayoutVariant::Square);
    let err = FormatRegistry::new(vec![f.clone(), f]).unwrap_err();
    assert!(err.to_string().contains("duplicate format id 'a'"));
}

#[test]
fn non_positive_geometry_and_scale_are_rejected() {
    let zero = FormatSpec::new("z", "Z", 0, 10, 1.0, LayoutVariant::Square);
    assert!(FormatRegistry::new(vec![zero]).is_err());

    let nan = FormatSpec::new("n", "N", 10, 10, f64::NAN, LayoutVariant::Square);
    assert!(FormatRegistry::new(vec![nan]).is_err());

    let neg = FormatSpec::new("n", "N", 10, 10, -1.0, LayoutVariant::Square);
    assert!(FormatRegistry::new(vec![neg]).is_err());

    assert!(FormatRegistry::new(vec![]).is_err());
}

#[test]
fn lookup_by_id_and_geometry() {
    let reg = FormatRegistry::builtin();
    assert_eq!(reg.require("story").unwrap().height, 1920);
    assert!(reg.require("nope").is_err());
    assert_eq!(reg.find_geometry(1200, 628).unwrap().id, "landscape");
    assert!(reg.find_geometry(1, 1).is_none());
}

#[test]
fn format_spec_json_defaults_font_scale() {
    let json = r#"{"id":"x","label":"X","width":5,"height":6,"layout_variant":"wide-thumbnail"}"#;
    let f: FormatSpec = serde_json::from_str(json).unwrap();
    assert_eq!(f.font_scale, 1.0);
    assert_eq!(f.layout_variant, LayoutVariant::WideThumbnail);
}
