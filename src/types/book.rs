use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::{
    error::GridError,
    types::{
        date::normalize_date,
        rating::Rating,
        row::Row,
    },
};

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherInfo {
    #[serde(rename = "Date", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Typed view of one catalog row.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(
        rename = "DT_RowId",
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub row_id:         Option<String>,
    #[serde(rename = "Title", default)]
    pub title:          String,
    #[serde(rename = "Author", default)]
    pub author:         String,
    #[serde(rename = "PublisherInfo", default, deserialize_with = "null_as_default")]
    pub publisher_info: PublisherInfo,
    #[serde(rename = "Pages", default, deserialize_with = "lenient_pages")]
    pub pages:          Option<u32>,
    #[serde(rename = "Themes", default, deserialize_with = "null_as_default")]
    pub themes:         Vec<String>,
    #[serde(rename = "Rating", default)]
    pub rating:         Option<Rating>,
    #[serde(rename = "Description", default)]
    pub description:    Option<String>,
}

impl Book {
    pub fn from_row(row: &Row) -> Result<Self, GridError> {
        serde_path_to_error::deserialize(Value::Object(row.clone())).map_err(|e| {
            GridError::Response {
                path:    e.path().to_string(),
                message: e.inner().to_string(),
            }
        })
    }

    /// Field values keyed by editor field name, as the editor form submits them.
    pub fn to_editor_values(&self) -> Row {
        let mut values = Row::new();
        values.insert("Title".into(), json!(self.title));
        values.insert("Author".into(), json!(self.author));
        values.insert(
            "PublisherInfo.Date".into(),
            json!(self
                .publisher_info
                .date
                .as_deref()
                .map(normalize_date)
                .unwrap_or_default()),
        );
        values.insert(
            "Pages".into(),
            json!(self.pages.map(|p| p.to_string()).unwrap_or_default()),
        );
        values.insert("Themes".into(), json!(self.themes));
        values.insert(
            "Rating".into(),
            json!(self.rating.map(|r| r.as_str()).unwrap_or_default()),
        );
        values.insert(
            "Description".into(),
            json!(self.description.clone().unwrap_or_default()),
        );
        values
    }
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} by {}", self.title, self.author)?;
        if let Some(id) = &self.row_id {
            write!(f, " ({id})")?;
        }
        Ok(())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_pages<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    use serde::de::Error;
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s.trim().parse().map(Some).map_err(D::Error::custom),
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("{n} is not a page count"))),
        Some(other) => Err(D::Error::custom(format!("{other} is not a page count"))),
    }
}
