use carenav_checklists::validate::{SchemaIssue, validate_schema};
use carenav_core::models::field::{FieldDefinition, FieldType};
use carenav_core::models::schema::{ChecklistSchema, Heading};

fn schema(fields: Vec<FieldDefinition>) -> ChecklistSchema {
    ChecklistSchema {
        id: "test".to_string(),
        name: "Test".to_string(),
        version: 1,
        headings: vec![Heading {
            id: "main".to_string(),
            title: "Main".to_string(),
        }],
        fields,
    }
}

fn checkbox(id: &str) -> FieldDefinition {
    FieldDefinition::new(id, FieldType::Checkbox, id)
}

#[test]
fn well_formed_schema_has_no_issues() {
    let s = schema(vec![
        checkbox("p").with_heading("main"),
        FieldDefinition::new("r", FieldType::Radio, "R")
            .with_parent("p")
            .with_options(["A", "B"]),
        checkbox("a").with_parent("r").with_parent_option("A"),
        checkbox("any").with_parent("r"),
    ]);
    assert!(validate_schema(&s).is_empty());
}

#[test]
fn reports_duplicates_and_dangling_parents() {
    let s = schema(vec![
        checkbox("p"),
        checkbox("p"),
        checkbox("c").with_parent("ghost"),
    ]);
    let issues = validate_schema(&s);

    assert!(issues.contains(&SchemaIssue::DuplicateId { id: "p".to_string() }));
    assert!(issues.contains(&SchemaIssue::DanglingParent {
        id: "c".to_string(),
        parent_id: "ghost".to_string(),
    }));
    assert!(issues.iter().all(SchemaIssue::is_structural));
}

#[test]
fn reports_each_cycle_once() {
    let s = schema(vec![
        checkbox("root"),
        checkbox("a").with_parent("c"),
        checkbox("b").with_parent("a"),
        checkbox("c").with_parent("b"),
        checkbox("tail").with_parent("a"),
        checkbox("me").with_parent("me"),
    ]);
    let issues = validate_schema(&s);

    let cycles: Vec<&Vec<String>> = issues
        .iter()
        .filter_map(|issue| match issue {
            SchemaIssue::Cycle { ids } => Some(ids),
            _ => None,
        })
        .collect();
    assert_eq!(cycles.len(), 1);
    let mut members = cycles[0].clone();
    members.sort();
    assert_eq!(members, vec!["a", "b", "c"]);

    assert!(issues.contains(&SchemaIssue::SelfParent { id: "me".to_string() }));
}

#[test]
fn reports_radio_option_problems() {
    let s = schema(vec![
        checkbox("p"),
        checkbox("needs_radio").with_parent("p").with_parent_option("A"),
        FieldDefinition::new("r", FieldType::Radio, "R").with_options(["A"]),
        checkbox("wrong_option").with_parent("r").with_parent_option("Z"),
        FieldDefinition::new("empty", FieldType::Radio, "Empty"),
    ]);
    let issues = validate_schema(&s);

    assert!(issues.contains(&SchemaIssue::OptionWithoutRadioParent {
        id: "needs_radio".to_string(),
        parent_id: "p".to_string(),
    }));
    assert!(issues.contains(&SchemaIssue::UnknownParentOption {
        id: "wrong_option".to_string(),
        parent_id: "r".to_string(),
        option: "Z".to_string(),
    }));
    assert!(issues.contains(&SchemaIssue::RadioWithoutOptions {
        id: "empty".to_string()
    }));
    assert!(!issues.iter().any(SchemaIssue::is_structural));
}

#[test]
fn reports_unknown_heading() {
    let s = schema(vec![checkbox("p").with_heading("elsewhere")]);
    assert_eq!(
        validate_schema(&s),
        vec![SchemaIssue::UnknownHeading {
            id: "p".to_string(),
            heading_id: "elsewhere".to_string(),
        }]
    );
}

#[test]
fn issues_serialize_with_kind_tag() {
    let issue = SchemaIssue::SelfParent { id: "me".to_string() };
    let json = serde_json::to_value(&issue).unwrap();
    assert_eq!(json["kind"], "self_parent");
    assert_eq!(json["id"], "me");
}
