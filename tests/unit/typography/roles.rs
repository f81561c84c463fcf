use super::*;

#[test]
fn from_map_requires_every_role() {
    let mut map: BTreeMap<Role, u32> = Role::ALL.iter().map(|&r| (r, 10)).collect();
    map.remove(&Role::Footer);
    let err = RoleSizes::from_map(&map).unwrap_err();
    assert!(err.to_string().starts_with("configuration error:"));
    assert!(err.to_string().contains("footer"));
}

#[test]
fn zero_size_is_rejected() {
    let mut sizes = [10u32; Role::COUNT];
    sizes[Role::Label as usize] = 0;
    let err = RoleSizes::new(sizes).unwrap_err();
    assert!(err.to_string().contains("label"));
}

#[test]
fn json_uses_kebab_role_keys() {
    let sizes = RoleSizes::new([1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    let json = serde_json::to_value(sizes).unwrap();
    assert_eq!(json["card-title"], 4);
    assert_eq!(json["footer"], 8);
    let back: RoleSizes = serde_json::from_value(json).unwrap();
    assert_eq!(back.get(Role::Statistic), 6);
}

#[test]
fn json_missing_role_fails_to_parse() {
    let res: Result<RoleSizes, _> = serde_json::from_str(r#"{"headline": 10}"#);
    assert!(res.is_err());
}

#[test]
fn default_faces_follow_brand_split() {
    let faces = RoleFaces::default();
    assert_eq!(faces.get(Role::Headline), &FontFace::new(DISPLAY_FAMILY, 900));
    assert_eq!(faces.get(Role::Body).family, TEXT_FAMILY);
    assert_eq!(faces.families(), vec!["Kanit".to_owned(), "Saira Condensed".to_owned()]);

    let faces = faces.with(Role::Body, FontFace::new("Inter", 400));
    assert_eq!(faces.get(Role::Body).weight, 400);
    assert_eq!(faces.families().len(), 3);
}

#[test]
fn uniform_faces_keep_brand_weights() {
    let faces = RoleFaces::uniform("DejaVu Sans Mono");
    assert_eq!(faces.families(), vec!["DejaVu Sans Mono".to_owned()]);
    assert_eq!(faces.get(Role::Headline).weight, 900);
    assert_eq!(faces.get(Role::Body).weight, 300);
}
