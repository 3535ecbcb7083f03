use carenav_checklists::{
    FieldIndex, apply_change, collect_descendant_ids, default_values, is_visible,
    on_checkbox_toggle, on_radio_select,
};
use carenav_checklists::ChecklistError;
use carenav_core::models::field::{FieldDefinition, FieldType};
use carenav_core::models::values::{FieldValue, FormValueMap};

fn checkbox(id: &str) -> FieldDefinition {
    FieldDefinition::new(id, FieldType::Checkbox, id)
}

fn radio(id: &str, options: &[&str]) -> FieldDefinition {
    FieldDefinition::new(id, FieldType::Radio, id).with_options(options.iter().copied())
}

fn group(id: &str) -> FieldDefinition {
    FieldDefinition::new(id, FieldType::Group, id)
}

fn values(entries: &[(&str, FieldValue)]) -> FormValueMap {
    entries.iter().cloned().collect()
}

#[test]
fn root_fields_are_always_visible() {
    let fields = vec![checkbox("p"), radio("r", &["A"]), group("g")];
    let index = FieldIndex::new(&fields);

    for v in [
        FormValueMap::new(),
        values(&[("p", false.into()), ("r", "A".into())]),
    ] {
        for field in &fields {
            assert!(is_visible(field, &v, &index), "{} should be visible", field.id);
        }
    }
}

#[test]
fn checkbox_parent_gates_children() {
    let fields = vec![checkbox("p"), checkbox("c").with_parent("p")];
    let index = FieldIndex::new(&fields);
    let child = &fields[1];

    assert!(!is_visible(child, &FormValueMap::new(), &index));
    assert!(!is_visible(child, &values(&[("p", false.into())]), &index));
    assert!(is_visible(child, &values(&[("p", true.into())]), &index));
}

#[test]
fn radio_child_without_option_shows_for_any_selection() {
    let fields = vec![
        radio("r", &["A", "B"]),
        FieldDefinition::new("other", FieldType::Checkbox, "Other").with_parent("r"),
    ];
    let index = FieldIndex::new(&fields);
    let child = &fields[1];

    assert!(is_visible(child, &values(&[("r", "A".into())]), &index));
    assert!(is_visible(child, &values(&[("r", "B".into())]), &index));
    assert!(!is_visible(child, &FormValueMap::new(), &index));
}

#[test]
fn radio_child_with_option_shows_only_for_that_option() {
    let fields = vec![
        radio("r", &["A", "B"]),
        checkbox("a_only").with_parent("r").with_parent_option("A"),
    ];
    let index = FieldIndex::new(&fields);
    let child = &fields[1];

    assert!(is_visible(child, &values(&[("r", "A".into())]), &index));
    assert!(!is_visible(child, &values(&[("r", "B".into())]), &index));
    assert!(!is_visible(child, &FormValueMap::new(), &index));
}

#[test]
fn nested_groups_inherit_hidden_checkbox() {
    let fields = vec![
        checkbox("gate"),
        group("g1").with_parent("gate"),
        group("g2").with_parent("g1"),
        checkbox("leaf").with_parent("g2"),
    ];
    let index = FieldIndex::new(&fields);

    let unchecked = values(&[("gate", false.into())]);
    assert!(!is_visible(&fields[2], &unchecked, &index));
    assert!(!is_visible(&fields[3], &unchecked, &index));

    let checked = values(&[("gate", true.into())]);
    assert!(is_visible(&fields[2], &checked, &index));
    assert!(is_visible(&fields[3], &checked, &index));
}

#[test]
fn dangling_parent_fails_open() {
    let fields = vec![checkbox("orphan").with_parent("missing")];
    let index = FieldIndex::new(&fields);
    assert!(is_visible(&fields[0], &FormValueMap::new(), &index));
}

#[test]
fn static_parent_types_fail_open() {
    let fields = vec![
        FieldDefinition::new("h", FieldType::Heading, "Heading"),
        checkbox("under_heading").with_parent("h"),
        FieldDefinition::new("l", FieldType::Link, "See https://example.org"),
        checkbox("under_link").with_parent("l"),
    ];
    let index = FieldIndex::new(&fields);
    assert!(is_visible(&fields[1], &FormValueMap::new(), &index));
    assert!(is_visible(&fields[3], &FormValueMap::new(), &index));
}

#[test]
fn visibility_is_idempotent() {
    let fields = vec![checkbox("p"), checkbox("c").with_parent("p")];
    let index = FieldIndex::new(&fields);
    let v = values(&[("p", true.into())]);

    let first = is_visible(&fields[1], &v, &index);
    let second = is_visible(&fields[1], &v, &index);
    assert_eq!(first, second);
    assert_eq!(v, values(&[("p", true.into())]));
}

#[test]
fn worked_scenario() {
    let fields = vec![
        checkbox("p"),
        radio("c1", &["X", "Y"]).with_parent("p"),
        group("c1a").with_parent("c1").with_parent_option("X"),
    ];
    let index = FieldIndex::new(&fields);
    let (c1, c1a) = (&fields[1], &fields[2]);

    assert!(!is_visible(c1, &FormValueMap::new(), &index));

    let v = values(&[("p", true.into())]);
    assert!(is_visible(c1, &v, &index));
    assert!(!is_visible(c1a, &v, &index));

    let v = values(&[("p", true.into()), ("c1", "X".into())]);
    assert!(is_visible(c1a, &v, &index));

    let v = values(&[("p", true.into()), ("c1", "Y".into())]);
    assert!(!is_visible(c1a, &v, &index));
}

#[test]
fn descendants_cover_the_whole_subtree() {
    let fields = vec![
        checkbox("p"),
        group("g").with_parent("p"),
        checkbox("a").with_parent("g"),
        radio("b", &["Y"]).with_parent("g"),
        checkbox("b1").with_parent("b"),
        checkbox("unrelated"),
    ];
    let index = FieldIndex::new(&fields);

    let found: Vec<&str> = collect_descendant_ids("p", &index).into_iter().collect();
    assert_eq!(found, vec!["a", "b", "b1", "g"]);
    assert!(collect_descendant_ids("unrelated", &index).is_empty());
    assert!(collect_descendant_ids("nope", &index).is_empty());
}

#[test]
fn descendants_terminate_on_cycles() {
    let fields = vec![
        group("a").with_parent("c"),
        group("b").with_parent("a"),
        group("c").with_parent("b"),
        checkbox("self").with_parent("self"),
    ];
    let index = FieldIndex::new(&fields);

    let found: Vec<&str> = collect_descendant_ids("a", &index).into_iter().collect();
    assert_eq!(found, vec!["b", "c"]);
    assert!(collect_descendant_ids("self", &index).is_empty());

    // Group-only cycles are shown rather than looping.
    assert!(is_visible(&fields[0], &FormValueMap::new(), &index));
}

#[test]
fn unchecking_removes_descendant_keys() {
    let fields = vec![
        checkbox("p"),
        radio("c", &["answer", "other"]).with_parent("p"),
    ];
    let index = FieldIndex::new(&fields);
    let before = values(&[("p", true.into()), ("c", "answer".into())]);

    let after = on_checkbox_toggle(&fields[0], false, &before, &index);
    assert_eq!(after.get("p"), Some(&FieldValue::Bool(false)));
    assert!(!after.contains_key("c"));
    // Caller's map is untouched.
    assert_eq!(before.get("c"), Some(&FieldValue::from("answer")));

    let rechecked = on_checkbox_toggle(&fields[0], true, &after, &index);
    assert_eq!(rechecked.get("p"), Some(&FieldValue::Bool(true)));
    assert!(is_visible(&fields[1], &rechecked, &index));
    assert!(rechecked.get("c").is_none());
}

#[test]
fn checking_keeps_descendant_values() {
    let fields = vec![checkbox("p"), checkbox("c").with_parent("p")];
    let index = FieldIndex::new(&fields);
    let before = values(&[("p", false.into()), ("c", true.into())]);

    let after = on_checkbox_toggle(&fields[0], true, &before, &index);
    assert_eq!(after.get("c"), Some(&FieldValue::Bool(true)));
}

#[test]
fn radio_switch_clears_descendants() {
    let fields = vec![
        radio("r", &["A", "B"]),
        checkbox("c").with_parent("r").with_parent_option("A"),
        checkbox("c_deep").with_parent("c"),
    ];
    let index = FieldIndex::new(&fields);
    let before = values(&[
        ("r", "A".into()),
        ("c", true.into()),
        ("c_deep", true.into()),
    ]);

    let after = on_radio_select(&fields[0], "B", &before, &index);
    assert_eq!(after.get("r"), Some(&FieldValue::from("B")));
    assert!(!after.contains_key("c"));
    assert!(!after.contains_key("c_deep"));

    // Reselecting the same option still clears.
    let again = on_radio_select(&fields[0], "A", &before, &index);
    assert!(!again.contains_key("c"));
}

#[test]
fn apply_change_dispatches_by_field_type() {
    let fields = vec![
        checkbox("p"),
        radio("r", &["A"]).with_parent("p"),
        FieldDefinition::new("h", FieldType::Heading, "Heading"),
    ];
    let index = FieldIndex::new(&fields);
    let start = values(&[("p", true.into()), ("r", "A".into())]);

    let next = apply_change(&index, "t", "p", false.into(), &start).unwrap();
    assert!(!next.contains_key("r"));

    let next = apply_change(&index, "t", "r", "A".into(), &start).unwrap();
    assert_eq!(next.get("r"), Some(&FieldValue::from("A")));

    assert!(matches!(
        apply_change(&index, "t", "p", "yes".into(), &start),
        Err(ChecklistError::ValueMismatch { expected: "boolean", .. })
    ));
    assert!(matches!(
        apply_change(&index, "t", "r", true.into(), &start),
        Err(ChecklistError::ValueMismatch { expected: "string", .. })
    ));
    assert!(matches!(
        apply_change(&index, "t", "h", true.into(), &start),
        Err(ChecklistError::NotInteractive { .. })
    ));
    assert!(matches!(
        apply_change(&index, "t", "missing", true.into(), &start),
        Err(ChecklistError::UnknownField { .. })
    ));
}

#[test]
fn defaults_come_from_declarations() {
    let fields = vec![
        checkbox("p").with_default(false),
        radio("r", &["A", "B"]).with_default("B"),
        checkbox("none"),
    ];
    let index = FieldIndex::new(&fields);

    let defaults = default_values(&index);
    assert_eq!(defaults.len(), 2);
    assert_eq!(defaults.get("p"), Some(&FieldValue::Bool(false)));
    assert_eq!(defaults.get("r"), Some(&FieldValue::from("B")));
}

#[test]
fn cascade_clear_leaves_other_branches_alone() {
    let fields = vec![
        checkbox("p"),
        checkbox("child").with_parent("p"),
        checkbox("grandchild").with_parent("child"),
        checkbox("sibling"),
        checkbox("sibling_child").with_parent("sibling"),
    ];
    let index = FieldIndex::new(&fields);
    // `child` is already unset; only `grandchild` has a value to clear.
    let before = values(&[
        ("p", true.into()),
        ("grandchild", true.into()),
        ("sibling", true.into()),
        ("sibling_child", true.into()),
    ]);

    let after = on_checkbox_toggle(&fields[0], false, &before, &index);
    assert!(!after.contains_key("grandchild"));
    assert!(!after.contains_key("child"));
    assert_eq!(after.get("sibling"), Some(&FieldValue::Bool(true)));
    assert_eq!(after.get("sibling_child"), Some(&FieldValue::Bool(true)));
    assert_eq!(after.len(), 3);
}
