use serde_json::Value;

use crate::{
    editor::{
        action::{Action, EditorRequest},
        fields::FieldSpec,
    },
    types::{
        date::reformat_for_display,
        row::{get_path, Row},
    },
};

/// Values of one open create or edit form, keyed by field name.
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub action: Action,
    pub row_id: Option<String>,
    pub values: Row,
}

impl EditForm {
    pub fn create(fields: &[FieldSpec]) -> Self {
        Self {
            action: Action::Create,
            row_id: None,
            values: fields
                .iter()
                .map(|f| (f.name.to_string(), f.empty_value()))
                .collect(),
        }
    }

    /// Fills the form from a row. Longer timestamps in date fields are shown in
    /// their plain date form; the row itself is left untouched.
    pub fn edit(fields: &[FieldSpec], row_id: impl Into<String>, row: &Row) -> Self {
        let values = fields
            .iter()
            .map(|f| {
                let value = match get_path(row, f.name) {
                    Some(Value::String(s)) if f.is_date() => Value::String(reformat_for_display(s)),
                    Some(Value::Null) | None => f.empty_value(),
                    Some(v) => v.clone(),
                };
                (f.name.to_string(), value)
            })
            .collect();
        Self {
            action: Action::Edit,
            row_id: Some(row_id.into()),
            values,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    pub fn into_request(self) -> EditorRequest {
        match (self.action, self.row_id) {
            (Action::Edit, Some(id)) => EditorRequest::edit([(id, self.values)]),
            _ => EditorRequest::create(self.values),
        }
    }
}
