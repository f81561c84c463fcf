use super::*;
use crate::typography::roles::Role;

fn sizes(n: u32) -> RoleSizes {
    RoleSizes::new([n; Role::COUNT]).unwrap()
}

#[test]
fn with_returns_new_table_and_keeps_old() {
    let empty = OverrideTable::new();
    let one = empty.with("story", sizes(50));
    assert!(empty.is_empty());
    assert_eq!(one.len(), 1);
    assert_eq!(one.get("story"), Some(&sizes(50)));

    let two = one.with("portrait", sizes(40));
    assert_eq!(one.len(), 1);
    assert_eq!(two.ids().collect::<Vec<_>>(), vec!["portrait", "story"]);

    let back = two.without("story");
    assert_eq!(two.len(), 2);
    assert_eq!(back.ids().collect::<Vec<_>>(), vec!["portrait"]);
}

#[test]
fn unknown_format_id_fails_validation() {
    let reg = FormatRegistry::builtin();
    let ok = OverrideTable::new().with("story", sizes(50));
    assert!(ok.validate_against(&reg).is_ok());
    let bad = ok.with("billboard", sizes(50));
    let err = bad.validate_against(&reg).unwrap_err();
    assert!(err.to_string().contains("billboard"));
}

#[test]
fn json_round_trip_keeps_entries() {
    let t = OverrideTable::new().with("story", sizes(33));
    let json = serde_json::to_string(&t).unwrap();
    let back: OverrideTable = serde_json::from_str(&json).unwrap();
    assert_eq!(back, t);
}
