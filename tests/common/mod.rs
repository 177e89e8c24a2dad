#![allow(dead_code)]

use std::{cell::RefCell, collections::VecDeque};

use bookgrid::{
    config::BOOKS_PATH,
    editor::{EditForm, EditorRequest, EditorResponse},
    error::{EditorError, TransportError},
    traits::{EditorEvents, Transport},
    types::row::Row,
};
use serde_json::{json, Value};

pub const EDITOR_PATH: &str = "/api/editor/books";

/// In-memory stand-in for the catalog service. Grid requests are answered from
/// `rows`; editor requests from the scripted queue, or `{"data": []}`.
#[derive(Default)]
pub struct RecordingTransport {
    pub calls:        RefCell<Vec<(String, Value)>>,
    pub rows:         RefCell<Vec<Row>>,
    editor_responses: RefCell<VecDeque<Result<Value, TransportError>>>,
}

impl RecordingTransport {
    pub fn with_rows(rows: Vec<Value>) -> Self {
        let transport = Self::default();
        *transport.rows.borrow_mut() = rows.into_iter().map(to_row).collect();
        transport
    }

    pub fn respond_to_editor(&self, response: Result<Value, TransportError>) {
        self.editor_responses.borrow_mut().push_back(response);
    }

    pub fn urls(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(u, _)| u.clone()).collect()
    }

    pub fn grid_requests(&self) -> Vec<Value> {
        self.calls
            .borrow()
            .iter()
            .filter(|(u, _)| u == BOOKS_PATH)
            .map(|(_, b)| b.clone())
            .collect()
    }

    pub fn last_body(&self) -> Value {
        self.calls
            .borrow()
            .last()
            .map(|(_, b)| b.clone())
            .unwrap_or(Value::Null)
    }
}

impl Transport for RecordingTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError> {
        self.calls.borrow_mut().push((url.to_string(), body.clone()));
        if url == BOOKS_PATH {
            let rows = self.rows.borrow();
            let start = body["start"].as_u64().unwrap_or(0) as usize;
            let length = body["length"].as_u64().unwrap_or(10) as usize;
            let page: Vec<Row> = rows.iter().skip(start).take(length).cloned().collect();
            return Ok(json!({
                "draw": body["draw"],
                "recordsTotal": rows.len(),
                "recordsFiltered": rows.len(),
                "data": page,
            }));
        }
        self.editor_responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({"data": []})))
    }
}

/// Keeps everything the session reports.
#[derive(Default)]
pub struct RecordedEvents {
    pub opened:    Vec<EditForm>,
    pub submitted: Vec<EditorRequest>,
    pub successes: Vec<EditorResponse>,
    pub errors:    Vec<EditorError>,
}

impl EditorEvents for RecordedEvents {
    fn on_init_edit(&mut self, form: &mut EditForm) {
        self.opened.push(form.clone());
    }

    fn on_before_submit(&mut self, request: &mut EditorRequest) {
        self.submitted.push(request.clone());
    }

    fn on_submit_success(&mut self, response: &EditorResponse) {
        self.successes.push(response.clone());
    }

    fn on_submit_error(&mut self, error: &EditorError) {
        self.errors.push(error.clone());
    }
}

pub fn to_row(v: Value) -> Row {
    v.as_object().cloned().expect("row must be an object")
}

pub fn book(id: &str, title: &str) -> Value {
    json!({
        "DT_RowId": id,
        "Title": title,
        "Author": "Quinn Novak",
        "PublisherInfo": {"Date": "2024-05-01T00:00:00Z"},
        "Pages": 320,
        "Themes": ["Surveillance state", "Mind control"],
        "Rating": 4.0,
        "Description": "A chilling narrative."
    })
}
