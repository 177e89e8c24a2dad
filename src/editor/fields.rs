use serde_json::{json, Value};

use crate::types::{date::WIRE_FORMAT, rating::Rating, theme::Theme};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    /// `format` is a chrono format string; values are submitted in that form.
    Datetime { format: &'static str },
    Select {
        options:  Vec<SelectOption>,
        multiple: bool,
    },
    Textarea,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub label:       &'static str,
    /// Dotted data path, also the key the value is submitted under.
    pub name:        &'static str,
    pub kind:        FieldKind,
    pub placeholder: Option<&'static str>,
}

impl FieldSpec {
    pub fn new(label: &'static str, name: &'static str, kind: FieldKind) -> Self {
        Self {
            label,
            name,
            kind,
            placeholder: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn is_date(&self) -> bool {
        matches!(self.kind, FieldKind::Datetime { .. })
    }

    pub fn is_multiple(&self) -> bool {
        matches!(self.kind, FieldKind::Select { multiple: true, .. })
    }

    /// Value of this field in a freshly opened create form.
    pub fn empty_value(&self) -> Value {
        if self.is_multiple() {
            json!([])
        } else {
            json!("")
        }
    }

    /// Field declaration in the editor widget's option-object shape.
    pub fn widget_options(&self) -> Value {
        let mut field = json!({"label": self.label, "name": self.name});
        let mut attr = serde_json::Map::new();
        if let Some(p) = self.placeholder {
            attr.insert("placeholder".into(), json!(p));
        }
        match &self.kind {
            FieldKind::Text => field["type"] = json!("text"),
            FieldKind::Number => {
                field["type"] = json!("text");
                attr.insert("type".into(), json!("number"));
            }
            FieldKind::Datetime { format } => {
                field["type"] = json!("datetime");
                field["format"] = json!(moment_format(format));
            }
            FieldKind::Select { options, multiple } => {
                field["type"] = json!("select");
                if *multiple {
                    field["multiple"] = json!(true);
                }
                field["options"] = options
                    .iter()
                    .map(|o| json!({"label": o.label, "value": o.value}))
                    .collect();
            }
            FieldKind::Textarea => field["type"] = json!("textarea"),
        }
        if !attr.is_empty() {
            field["attr"] = Value::Object(attr);
        }
        field
    }
}

fn moment_format(format: &str) -> String {
    format
        .replace("%Y", "YYYY")
        .replace("%m", "MM")
        .replace("%d", "DD")
}

pub fn theme_options() -> Vec<SelectOption> {
    Theme::ALL
        .iter()
        .map(|t| SelectOption {
            label: t.to_string(),
            value: t.to_string(),
        })
        .collect()
}

pub fn rating_options() -> Vec<SelectOption> {
    Rating::ALL
        .iter()
        .map(|r| SelectOption {
            label: r.label(),
            value: r.to_string(),
        })
        .collect()
}

/// Form fields of a catalog record.
pub fn book_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("Title", "Title", FieldKind::Text),
        FieldSpec::new("Author", "Author", FieldKind::Text),
        FieldSpec::new("Publication Date", "PublisherInfo.Date", FieldKind::Datetime {
            format: WIRE_FORMAT,
        })
        .with_placeholder("YYYY-MM-DD"),
        FieldSpec::new("Pages", "Pages", FieldKind::Number),
        FieldSpec::new("Themes", "Themes", FieldKind::Select {
            options:  theme_options(),
            multiple: true,
        }),
        FieldSpec::new("Rating", "Rating", FieldKind::Select {
            options:  rating_options(),
            multiple: false,
        }),
        FieldSpec::new("Description", "Description", FieldKind::Textarea),
    ]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn date_field_widget_shape() {
        let fields = book_fields();
        let date = fields.iter().find(|f| f.is_date()).unwrap();
        assert_eq!(
            date.widget_options(),
            json!({
                "label": "Publication Date",
                "name": "PublisherInfo.Date",
                "type": "datetime",
                "format": "YYYY-MM-DD",
                "attr": {"placeholder": "YYYY-MM-DD"}
            })
        );
    }

    #[test]
    fn rating_select_values_are_strings() {
        let fields = book_fields();
        let rating = fields.iter().find(|f| f.name == "Rating").unwrap();
        let options = rating.widget_options()["options"].clone();
        assert_eq!(options[0], json!({"label": "★★½ (2.5)", "value": "2.5"}));
        assert_eq!(options.as_array().unwrap().len(), 6);
    }
}
