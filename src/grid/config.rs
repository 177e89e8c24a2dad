use serde::Serialize;

use crate::{grid::render::Renderer, types::row::ROW_ID};

/// Toolbar button, serialized as `{"extend": "<name>"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "extend", rename_all = "lowercase")]
pub enum Button {
    Create,
    Edit,
    Remove,
    Copy,
    Csv,
    Excel,
    Pdf,
    Print,
}

impl Button {
    pub const EDITING: [Button; 3] = [Button::Create, Button::Edit, Button::Remove];
    pub const EXPORT: [Button; 5] = [
        Button::Copy,
        Button::Csv,
        Button::Excel,
        Button::Pdf,
        Button::Print,
    ];

    pub fn is_editing(&self) -> bool {
        Self::EDITING.contains(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AjaxSource {
    pub url:          String,
    #[serde(rename = "type")]
    pub method:       String,
    #[serde(rename = "contentType")]
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Dotted path into the row.
    pub data:       String,
    pub title:      String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    pub render:     Renderer,
}

impl Column {
    pub fn new(data: &str, title: &str) -> Self {
        Self {
            data:       data.to_string(),
            title:      title.to_string(),
            class_name: None,
            render:     Renderer::Verbatim,
        }
    }

    pub fn render_with(mut self, render: Renderer) -> Self {
        self.render = render;
        self
    }

    pub fn class(mut self, class_name: &str) -> Self {
        self.class_name = Some(class_name.to_string());
        self
    }

    /// True when `name` refers to this column by data path or title.
    pub fn matches(&self, name: &str) -> bool {
        self.data.eq_ignore_ascii_case(name) || self.title.eq_ignore_ascii_case(name)
    }
}

/// Static message shown in place of the editing controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Notice {
    EditingUnavailable,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::EditingUnavailable => write!(
                f,
                "Editing is not available. The table is read-only; use the export buttons to \
                 copy or download rows."
            ),
        }
    }
}

/// Table declaration in the grid widget's option-object shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    pub dom:         String,
    pub server_side: bool,
    pub processing:  bool,
    pub page_length: u32,
    pub select:      bool,
    pub row_id:      String,
    pub buttons:     Vec<Button>,
    pub ajax:        AjaxSource,
    pub columns:     Vec<Column>,
}

impl GridConfig {
    /// The catalog table. Without `editing` only export buttons are offered.
    pub fn books(books_url: &str, page_length: u32, editing: bool) -> Self {
        Self {
            dom:         "Bfrtip".into(),
            server_side: true,
            processing:  true,
            page_length,
            select:      true,
            row_id:      ROW_ID.into(),
            buttons:     if editing {
                Button::EDITING.to_vec()
            } else {
                Button::EXPORT.to_vec()
            },
            ajax:        AjaxSource {
                url:          books_url.into(),
                method:       "POST".into(),
                content_type: "application/json".into(),
            },
            columns:     book_columns(),
        }
    }

    pub fn editing(&self) -> bool {
        self.buttons.iter().any(Button::is_editing)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.matches(name))
    }
}

pub fn book_columns() -> Vec<Column> {
    vec![
        Column::new("Title", "Title"),
        Column::new("Author", "Author"),
        Column::new("PublisherInfo.Date", "Published")
            .class("dt-center")
            .render_with(Renderer::LongDate),
        Column::new("Themes", "Themes").render_with(Renderer::ListJoin),
        Column::new("Pages", "Pages"),
        Column::new("Rating", "Rating"),
    ]
}
