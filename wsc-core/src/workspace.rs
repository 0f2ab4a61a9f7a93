use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A workspace as returned by the API. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(
        serialize_with = "serialize_datetime",
        deserialize_with = "deserialize_timestamp"
    )]
    pub timestamp: DateTime<Utc>,

    #[serde(
        default,
        rename = "projectIds",
        alias = "project_ids",
        deserialize_with = "null_as_default"
    )]
    pub project_ids: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub inputs: BTreeMap<String, serde_json::Value>,
}

impl Workspace {
    /// The name if set and non-empty.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

/// Body of a create request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewWorkspace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewWorkspace {
    /// Blank fields are sent as absent.
    pub fn new(name: Option<&str>, description: Option<&str>) -> Self {
        let clean = |s: Option<&str>| s.map(str::trim).filter(|s| !s.is_empty()).map(String::from);
        Self {
            name: clean(name),
            description: clean(description),
        }
    }
}

/// The backing collection: the latest fetched workspaces keyed by id, in
/// response order.
pub type WorkspaceSnapshot = IndexMap<String, Workspace>;

/// Builds a snapshot from a list response. A later record with an id already
/// seen replaces the earlier one in place.
pub fn snapshot_from(workspaces: Vec<Workspace>) -> WorkspaceSnapshot {
    let mut snapshot = WorkspaceSnapshot::with_capacity(workspaces.len());
    for workspace in workspaces {
        snapshot.insert(workspace.id.clone(), workspace);
    }
    snapshot
}

/// Computes the status label shown for a workspace.
pub trait StatusClassifier: Send + Sync {
    fn classify(&self, workspace: &Workspace) -> String;
}

impl<F> StatusClassifier for F
where
    F: Fn(&Workspace) -> String + Send + Sync,
{
    fn classify(&self, workspace: &Workspace) -> String {
        self(workspace)
    }
}

/// Summarises how many projects and inputs a workspace holds.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStatusClassifier;

impl StatusClassifier for DefaultStatusClassifier {
    fn classify(&self, workspace: &Workspace) -> String {
        let projects = workspace.project_ids.len();
        let inputs = workspace.inputs.len();
        if projects == 0 && inputs == 0 {
            return "empty".to_string();
        }
        format!(
            "{} {}, {} {}",
            projects,
            if projects == 1 { "project" } else { "projects" },
            inputs,
            if inputs == 1 { "input" } else { "inputs" },
        )
    }
}

fn serialize_datetime<S>(dt: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&dt.to_rfc3339())
}

// Some backends send `null` for an empty list or map.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Text(String),
}

// Accepts epoch milliseconds (number or numeric string) or RFC 3339.
fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let millis = match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Millis(ms) => ms,
        RawTimestamp::Text(text) => match text.trim().parse::<i64>() {
            Ok(ms) => ms,
            Err(_) => {
                return DateTime::parse_from_rfc3339(text.trim())
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| D::Error::custom(format!("invalid timestamp {text:?}: {e}")));
            }
        },
    };

    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {millis}")))
}
