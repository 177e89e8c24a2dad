use serde::Serialize;
use serde_json::Value;

use crate::types::{
    date::{format_long, parse_date_value},
    row::value_as_text,
};

/// Display rule of a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Renderer {
    #[default]
    Verbatim,
    /// Long en-US date, `May 1, 2024`. Unparseable values show as stored.
    LongDate,
    /// Array items joined with `", "`.
    ListJoin,
}

impl Renderer {
    pub fn render(&self, value: Option<&Value>) -> String {
        match self {
            Renderer::Verbatim => value.map(value_as_text).unwrap_or_default(),
            Renderer::LongDate => render_long_date(value),
            Renderer::ListJoin => render_list(value),
        }
    }
}

pub fn render_long_date(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) if s.is_empty() => String::new(),
        Some(v) => match parse_date_value(v) {
            Some(date) => format_long(date),
            None => value_as_text(v),
        },
    }
}

pub fn render_list(value: Option<&Value>) -> String {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(value_as_text)
            .collect::<Vec<_>>()
            .join(", "),
        Some(v) => value_as_text(v),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn themes_join() {
        let themes = json!(["AI takeover", "Climate disaster"]);
        assert_eq!(Renderer::ListJoin.render(Some(&themes)), "AI takeover, Climate disaster");
        assert_eq!(Renderer::ListJoin.render(Some(&Value::Null)), "");
        assert_eq!(Renderer::ListJoin.render(None), "");
        assert_eq!(Renderer::ListJoin.render(Some(&json!([]))), "");
        assert_eq!(Renderer::ListJoin.render(Some(&json!("Mind control"))), "Mind control");
    }

    #[test]
    fn long_dates() {
        assert_eq!(Renderer::LongDate.render(Some(&json!("2024-05-01"))), "May 1, 2024");
        assert_eq!(
            Renderer::LongDate.render(Some(&json!("1987-11-23T00:00:00Z"))),
            "November 23, 1987"
        );
        assert_eq!(Renderer::LongDate.render(Some(&json!("not a date"))), "not a date");
        assert_eq!(Renderer::LongDate.render(Some(&json!(""))), "");
        assert_eq!(Renderer::LongDate.render(None), "");
    }

    #[test]
    fn verbatim() {
        assert_eq!(Renderer::Verbatim.render(Some(&json!(312))), "312");
        assert_eq!(Renderer::Verbatim.render(Some(&json!("4.5"))), "4.5");
        assert_eq!(Renderer::Verbatim.render(Some(&Value::Null)), "");
    }
}
