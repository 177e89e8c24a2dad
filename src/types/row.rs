//! Rows as they travel over the wire: insertion-ordered JSON objects whose fields
//! may be nested (`PublisherInfo.Date` addresses `{"PublisherInfo": {"Date": ..}}`).

use serde_json::{Map, Value};

pub type Row = Map<String, Value>;

/// Key of the server-assigned row identifier.
pub const ROW_ID: &str = "DT_RowId";

pub fn row_id(row: &Row) -> Option<String> {
    match row.get(ROW_ID)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Looks up a dotted path. A flat key spelled exactly like the path wins over
/// the nested lookup.
pub fn get_path<'a>(row: &'a Row, path: &str) -> Option<&'a Value> {
    if let Some(v) = row.get(path) {
        return Some(v);
    }
    let mut parts = path.split('.');
    let mut current = row.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// Follows the dotted path through nested objects only, ignoring a flat key.
pub fn get_nested_mut<'a>(row: &'a mut Row, path: &str) -> Option<&'a mut Value> {
    let mut parts = path.split('.');
    let mut current = row.get_mut(parts.next()?)?;
    for part in parts {
        current = current.as_object_mut()?.get_mut(part)?;
    }
    Some(current)
}

/// Writes `value` at a dotted path, creating intermediate objects as needed.
pub fn set_path(row: &mut Row, path: &str, value: Value) {
    let mut parts: Vec<&str> = path.split('.').collect();
    let last = match parts.pop() {
        Some(last) => last,
        None => return,
    };
    let mut current = row;
    for part in parts {
        let entry = current
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        current = match entry.as_object_mut() {
            Some(obj) => obj,
            None => return,
        };
    }
    current.insert(last.to_string(), value);
}

/// String form of a cell, the way it would be put into a text input.
pub fn value_as_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
