use serde_json::Value;

/// Literal a source record field is pinned to, beyond mere presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinnedValue {
    Int(i64),
    Str(&'static str),
}

impl PinnedValue {
    pub fn to_value(self) -> Value {
        match self {
            PinnedValue::Int(n) => Value::from(n),
            PinnedValue::Str(s) => Value::from(s),
        }
    }
}

/// Contract for one plugin's sources endpoint. Schemas are static
/// configuration; source records are ephemeral JSON maps the checker never
/// mutates.
#[derive(Debug)]
pub struct PluginSchema {
    pub plugin: &'static str,
    /// Field keys that must exist on the first source record.
    pub required_fields: &'static [&'static str],
    /// Fields of the first record that must equal an exact literal.
    /// Invariant: every pinned key is also a required field.
    pub pinned_values: &'static [(&'static str, PinnedValue)],
    pub content_type: &'static str,
}

impl PluginSchema {
    pub fn sources_path(&self) -> String {
        format!("/plugins/{}/sources", self.plugin)
    }
}

pub const SOURCES_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Builtin plugin contracts, one per data-source plugin the dashboard ships.
pub const BUILTIN_SCHEMAS: &[PluginSchema] = &[
    PluginSchema {
        plugin: "jira",
        required_fields: &[
            "CreatedAt",
            "UpdatedAt",
            "ID",
            "name",
            "endpoint",
            "basicAuthEncoded",
            "epicKeyField",
            "storyPointField",
            "remotelinkCommitShaPattern",
            "proxy",
        ],
        pinned_values: &[],
        content_type: SOURCES_CONTENT_TYPE,
    },
    PluginSchema {
        plugin: "jenkins",
        required_fields: &["ID", "Name", "Endpoint", "Username", "Password", "Proxy"],
        pinned_values: &[
            ("ID", PinnedValue::Int(1)),
            ("Name", PinnedValue::Str("Jenkins")),
        ],
        content_type: SOURCES_CONTENT_TYPE,
    },
    PluginSchema {
        plugin: "gitlab",
        required_fields: &["ID", "Name", "Endpoint", "Auth", "Proxy"],
        pinned_values: &[
            ("ID", PinnedValue::Int(1)),
            ("Name", PinnedValue::Str("Gitlab")),
        ],
        content_type: SOURCES_CONTENT_TYPE,
    },
    PluginSchema {
        plugin: "github",
        required_fields: &[
            "ID",
            "Name",
            "Endpoint",
            "Auth",
            "Proxy",
            "PrType",
            "PrComponent",
            "IssueSeverity",
            "IssuePriority",
            "IssueComponent",
            "IssueTypeBug",
            "IssueTypeIncident",
            "IssueTypeRequirement",
        ],
        pinned_values: &[
            ("ID", PinnedValue::Int(1)),
            ("Name", PinnedValue::Str("Github")),
        ],
        content_type: SOURCES_CONTENT_TYPE,
    },
];

pub fn schema_for(plugin: &str) -> Option<&'static PluginSchema> {
    BUILTIN_SCHEMAS.iter().find(|s| s.plugin == plugin)
}

pub fn builtin_names() -> Vec<&'static str> {
    BUILTIN_SCHEMAS.iter().map(|s| s.plugin).collect()
}
