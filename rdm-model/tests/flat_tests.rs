mod common;

use common::{EXAMPLE, IMAGE, OBSERVATION, PRODUCT};
use pretty_assertions::assert_eq;
use rdm_model::{dict, DataModel, DefaultArgs, EnumMember, Value};

fn example(tags: Vec<&str>) -> DataModel {
    DataModel::new(&EXAMPLE, dict! { "name" => "M1", "count" => 3, "tags" => tags }).unwrap()
}

fn paths(m: &DataModel, flatten_lists: bool) -> Vec<String> {
    m.flat_items(flatten_lists).map(|(path, _)| path).collect()
}

// ── flat_items ───────────────────────────────────────────────────

#[test]
fn lists_are_indexed_when_flattened() {
    let m = example(vec!["a", "b", "c"]);
    assert_eq!(paths(&m, true), ["name", "count", "tags.0", "tags.1", "tags.2"]);
}

#[test]
fn lists_are_leaves_when_not_flattened() {
    let m = example(vec!["a", "b", "c"]);
    let items: Vec<(String, &Value)> = m.flat_items(false).collect();
    assert_eq!(items.len(), 3);
    assert_eq!(items[2].0, "tags");
    assert_eq!(items[2].1.as_list().unwrap().len(), 3);
}

#[test]
fn empty_lists_vanish_when_flattened() {
    let m = example(Vec::new());
    assert_eq!(paths(&m, true), ["name", "count"]);
}

#[test]
fn every_call_starts_a_fresh_traversal() {
    let m = example(vec!["a"]);
    let first: Vec<_> = m.flat_items(true).collect();
    let second: Vec<_> = m.flat_items(true).collect();
    assert_eq!(first, second);
}

#[test]
fn traversal_is_lazy() {
    let m = DataModel::make_default(&IMAGE, None, &DefaultArgs::new()).unwrap();
    let mut items = m.flat_items(true);
    assert_eq!(items.next().unwrap().0, "meta.filename");
    assert_eq!(items.next().unwrap().0, "meta.exposure.type_");
}

#[test]
fn tagged_models_are_entered_too() {
    let m = DataModel::make_default(&PRODUCT, None, &DefaultArgs::new()).unwrap();
    let all = paths(&m, false);
    assert!(all.contains(&"reference.coordinate_distortion_transform".to_string()));
    assert!(all.contains(&"exposure.start_time".to_string()));
}

#[test]
fn internal_names_are_used_for_paths() {
    let m = DataModel::new(&OBSERVATION, dict! { "program" => "p", "pass" => 1, "visit" => 2 }).unwrap();
    assert_eq!(paths(&m, true), ["program", "pass_", "visit"]);
}

#[test]
fn dict_values_recurse_by_key() {
    let mut m = example(Vec::new());
    m.set("extra", dict! { "a" => 1, "b" => dict! { "c" => 2 } }).unwrap();
    assert_eq!(paths(&m, true), ["name", "count", "extra.a", "extra.b.c"]);
}

#[test]
fn enum_of_enum_is_unwrapped() {
    let inner = EnumMember::new("Inner", "A", "a");
    let mut m = example(Vec::new());
    m.set("kind", EnumMember::new("Outer", "X", inner)).unwrap();
    let leaf = m.flat_items(true).find(|(p, _)| p == "kind").unwrap().1;
    assert_eq!(leaf, &Value::from("a"));
}

#[test]
fn flat_items_on_image_reach_exposure_pattern() {
    let m = DataModel::make_default(&IMAGE, None, &DefaultArgs::new()).unwrap();
    let found: Vec<String> = m
        .flat_items(true)
        .map(|(p, _)| p)
        .filter(|p| p.starts_with("meta.exposure.read_pattern.3"))
        .collect();
    assert_eq!(
        found,
        [
            "meta.exposure.read_pattern.3.0",
            "meta.exposure.read_pattern.3.1",
            "meta.exposure.read_pattern.3.2",
            "meta.exposure.read_pattern.3.3",
        ]
    );
}

// ── to_flat_dict ─────────────────────────────────────────────────

#[test]
fn flat_dict_prefixes_namespace() {
    let flat = example(vec!["x"]).to_flat_dict(true);
    let keys: Vec<&str> = flat.keys().map(String::as_str).collect();
    assert_eq!(keys, ["roman.name", "roman.count", "roman.tags.0"]);
}

#[test]
fn flat_dict_renders_times_as_isot() {
    let m = DataModel::make_default(&PRODUCT, None, &DefaultArgs::new()).unwrap();
    let flat = m.to_flat_dict(true);
    assert_eq!(flat["roman.exposure.start_time"], Value::from("2020-01-01T00:00:00.000"));
}

#[test]
fn flat_dict_drops_arrays_on_request() {
    let m = DataModel::make_default(&IMAGE, None, &DefaultArgs::new()).unwrap();
    let with = m.to_flat_dict(true);
    let without = m.to_flat_dict(false);
    assert!(matches!(with["roman.data"], Value::Array(_)));
    assert!(!without.contains_key("roman.data"));
    assert!(!without.contains_key("roman.dq"));
    assert_eq!(with.len(), without.len() + 2);
}

#[test]
fn flat_dict_in_custom_namespace() {
    let flat = example(Vec::new()).to_flat_dict_in("asdf", false);
    assert!(flat.contains_key("asdf.name"));
}
