use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::types::row::Row;

/// Row key the editor uses for the single row of a create action.
pub const CREATE_ROW_KEY: &str = "0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Edit,
    Remove,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Remove => "remove",
        })
    }
}

/// Body of a call to the editor endpoint: `{action, data: {row id: fields}, id?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorRequest {
    pub action: Action,
    #[serde(default)]
    pub data:   Map<String, Value>,
    /// Explicit row identifiers, only meaningful for remove.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id:     Option<Vec<String>>,
}

impl EditorRequest {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            data: Map::new(),
            id: None,
        }
    }

    pub fn create(values: Row) -> Self {
        Self::new(Action::Create).with_row(CREATE_ROW_KEY, values)
    }

    pub fn edit(rows: impl IntoIterator<Item = (String, Row)>) -> Self {
        rows.into_iter()
            .fold(Self::new(Action::Edit), |req, (id, row)| req.with_row(id, row))
    }

    pub fn remove(ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::new(Action::Remove).with_ids(ids)
    }

    pub fn with_row(mut self, id: impl Into<String>, values: Row) -> Self {
        self.data.insert(id.into(), Value::Object(values));
        self
    }

    pub fn with_ids(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.id = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Payload keys in insertion order.
    pub fn payload_ids(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }

    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut Row> {
        self.data.values_mut().filter_map(Value::as_object_mut)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub name:   String,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data:         Vec<Row>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error:        Option<String>,
    #[serde(
        rename = "fieldErrors",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub field_errors: Vec<FieldError>,
}

impl EditorResponse {
    /// The error message if the server refused the submission inside a success response.
    pub fn rejection(&self) -> Option<String> {
        match self.error.as_deref() {
            Some(e) if !e.is_empty() => Some(e.to_string()),
            _ if !self.field_errors.is_empty() => Some(
                self.field_errors
                    .iter()
                    .map(|f| format!("{}: {}", f.name, f.status))
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            _ => None,
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
