mod common;

use common::{EXPOSURE, PHOT_ENTRY};
use rdm_model::{alias, ArrayAdaptor, Container, EnumType, TimeAdaptor, TypeExpr, Value};
use rdm_types::DType;

// ── Resolver ─────────────────────────────────────────────────────

#[test]
fn leaf_strips_every_optional_layer() {
    let ty = TypeExpr::optional(TypeExpr::optional(TypeExpr::Int));
    assert!(ty.is_optional());
    assert_eq!(ty.leaf(), &TypeExpr::Int);
}

#[test]
fn leaf_of_plain_type_is_itself() {
    assert_eq!(TypeExpr::Str.leaf(), &TypeExpr::Str);
    assert!(!TypeExpr::Str.is_optional());
}

#[test]
fn container_reports_sequence_args() {
    let ty = TypeExpr::optional(TypeExpr::list(TypeExpr::Str));
    match ty.container() {
        Some(Container::Sequence(args)) => assert_eq!(args, [TypeExpr::Str]),
        other => panic!("expected sequence, got {other:?}"),
    }
}

#[test]
fn bare_list_has_no_args() {
    match TypeExpr::bare_list().container() {
        Some(Container::Sequence(args)) => assert!(args.is_empty()),
        other => panic!("expected sequence, got {other:?}"),
    }
}

#[test]
fn container_reports_mapping_key_and_value() {
    let ty = TypeExpr::dict(TypeExpr::Str, TypeExpr::model(&PHOT_ENTRY));
    match ty.container() {
        Some(Container::Mapping { key, value }) => {
            assert_eq!(key, &TypeExpr::Str);
            assert_eq!(value.nested_model().unwrap().name(), "phot_entry");
        }
        other => panic!("expected mapping, got {other:?}"),
    }
}

#[test]
fn scalars_are_not_containers() {
    assert!(TypeExpr::Int.container().is_none());
    assert!(TypeExpr::model(&EXPOSURE).container().is_none());
}

#[test]
fn nested_model_sees_through_optional() {
    let ty = TypeExpr::optional(TypeExpr::model(&EXPOSURE));
    assert_eq!(ty.nested_model().unwrap().name(), "exposure");
    assert!(TypeExpr::Int.nested_model().is_none());
}

#[test]
fn adaptor_is_found_on_custom_leaves() {
    let ty = TypeExpr::optional(TypeExpr::custom(TimeAdaptor));
    assert_eq!(ty.adaptor().unwrap().name(), "time");
    assert!(TypeExpr::Time.adaptor().is_none());
}

// ── Display ──────────────────────────────────────────────────────

#[test]
fn display_names() {
    assert_eq!(TypeExpr::bare_list().to_string(), "list");
    assert_eq!(TypeExpr::list(TypeExpr::list(TypeExpr::Int)).to_string(), "list[list[int]]");
    assert_eq!(
        TypeExpr::List(vec![TypeExpr::Int, TypeExpr::Str]).to_string(),
        "list[int | str]"
    );
    assert_eq!(TypeExpr::dict(TypeExpr::Str, TypeExpr::Float).to_string(), "dict[str, float]");
    assert_eq!(TypeExpr::optional(TypeExpr::Bool).to_string(), "Optional[bool]");
    assert_eq!(
        TypeExpr::custom(ArrayAdaptor::new(DType::F32, 2)).to_string(),
        "ndarray[float32, 2d]"
    );
}

// ── Enumerations ─────────────────────────────────────────────────

#[test]
fn first_value_follows_declaration_order() {
    let e = EnumType::of_strings("Telescope", &["ROMAN", "HST"]);
    assert_eq!(e.first_value(), Some(&Value::from("ROMAN")));
}

#[test]
fn members_are_looked_up_by_name() {
    let e = EnumType::new("Level", [("LOW", 1), ("HIGH", 2)]);
    let member = e.member("HIGH").unwrap();
    assert_eq!(member.enum_name(), "Level");
    assert_eq!(member.value(), &Value::Int(2));
    assert!(e.member("MEDIUM").is_none());
    assert!(e.contains_value(&Value::Int(1)));
    assert!(!e.contains_value(&Value::Int(3)));
}

#[test]
fn empty_enum_has_no_first_value() {
    let e = EnumType::of_strings("Nothing", &[]);
    assert!(e.first_value().is_none());
}

// ── Reserved-word aliases ────────────────────────────────────────

#[test]
fn reserved_words_map_both_ways() {
    assert_eq!(alias::field_name("pass_"), "pass");
    assert_eq!(alias::field_name("type_"), "type");
    assert_eq!(alias::internal_name("pass"), "pass_");
}

#[test]
fn ordinary_names_are_unchanged() {
    assert_eq!(alias::field_name("visit_"), "visit_");
    assert_eq!(alias::field_name("program"), "program");
    assert_eq!(alias::internal_name("program"), "program");
    assert!(!alias::is_reserved("program"));
}
