use dashprobe::schema::*;
use serde_json::json;

#[test]
fn test_builtin_plugins_defined() {
    let names = builtin_names();
    assert_eq!(names, vec!["jira", "jenkins", "gitlab", "github"]);
}

#[test]
fn test_pinned_keys_are_required_fields() {
    for schema in BUILTIN_SCHEMAS {
        for (field, _) in schema.pinned_values {
            assert!(
                schema.required_fields.contains(field),
                "{}: pinned field {:?} is not in required_fields",
                schema.plugin,
                field
            );
        }
    }
}

#[test]
fn test_content_type_is_constant_across_plugins() {
    for schema in BUILTIN_SCHEMAS {
        assert_eq!(schema.content_type, SOURCES_CONTENT_TYPE);
    }
    assert_eq!(SOURCES_CONTENT_TYPE, "application/json; charset=utf-8");
}

#[test]
fn test_sources_paths() {
    for schema in BUILTIN_SCHEMAS {
        assert_eq!(
            schema.sources_path(),
            format!("/plugins/{}/sources", schema.plugin)
        );
    }
    let jenkins = schema_for("jenkins").expect("builtin schema");
    assert_eq!(jenkins.sources_path(), "/plugins/jenkins/sources");
}

#[test]
fn test_jira_pins_nothing() {
    let jira = schema_for("jira").expect("builtin schema");
    assert!(jira.pinned_values.is_empty());
    // jira mixes Go-style and camelCase keys; both casings matter
    assert!(jira.required_fields.contains(&"CreatedAt"));
    assert!(jira.required_fields.contains(&"name"));
    assert!(jira.required_fields.contains(&"endpoint"));
    assert!(jira.required_fields.contains(&"remotelinkCommitShaPattern"));
    assert_eq!(jira.required_fields.len(), 10);
}

#[test]
fn test_pinned_literals() {
    for (plugin, name) in [
        ("jenkins", "Jenkins"),
        ("gitlab", "Gitlab"),
        ("github", "Github"),
    ] {
        let schema = schema_for(plugin).expect("builtin schema");
        assert!(schema
            .pinned_values
            .contains(&("ID", PinnedValue::Int(1))));
        assert!(schema
            .pinned_values
            .contains(&("Name", PinnedValue::Str(name))));
    }
}

#[test]
fn test_github_issue_mapping_fields() {
    let github = schema_for("github").expect("builtin schema");
    for field in [
        "PrType",
        "PrComponent",
        "IssueSeverity",
        "IssuePriority",
        "IssueComponent",
        "IssueTypeBug",
        "IssueTypeIncident",
        "IssueTypeRequirement",
    ] {
        assert!(
            github.required_fields.contains(&field),
            "github schema is missing {:?}",
            field
        );
    }
    assert_eq!(github.required_fields.len(), 13);
}

#[test]
fn test_schema_for_unknown_plugin() {
    assert!(schema_for("bitbucket").is_none());
    assert!(schema_for("").is_none());
    // Lookup is exact; plugin identifiers are lowercase
    assert!(schema_for("Jenkins").is_none());
}

#[test]
fn test_pinned_value_to_value() {
    assert_eq!(PinnedValue::Int(1).to_value(), json!(1));
    assert_eq!(PinnedValue::Str("Jenkins").to_value(), json!("Jenkins"));
    assert_ne!(PinnedValue::Str("Jenkins").to_value(), json!("jenkins"));
}
