use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::{
    editor::{
        action::{Action, EditorRequest, EditorResponse},
        fields::{book_fields, FieldSpec},
        form::EditForm,
    },
    error::{EditorError, TransportError},
    traits::{EditorEvents, Transport},
    types::{
        date::normalize_date,
        row::{get_nested_mut, Row},
    },
};

/// Turns editor actions into single requests against the editor endpoint.
#[derive(Debug, Clone)]
pub struct EditSession {
    endpoint: String,
    fields:   Vec<FieldSpec>,
}

impl EditSession {
    pub fn new(endpoint: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            endpoint: endpoint.into(),
            fields,
        }
    }

    pub fn books(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint, book_fields())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Strips the time part off every date field of every row, whether the field
    /// is keyed flat (`"PublisherInfo.Date"`) or nested.
    pub fn normalize_dates(&self, request: &mut EditorRequest) {
        let date_fields: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.is_date())
            .map(|f| f.name)
            .collect();
        for row in request.rows_mut() {
            for name in &date_fields {
                if let Some(Value::String(s)) = row.get_mut(*name) {
                    truncate_to_date(s);
                }
                if name.contains('.') {
                    if let Some(Value::String(s)) = get_nested_mut(row, name) {
                        truncate_to_date(s);
                    }
                }
            }
        }
    }

    /// Endpoint URL for the request, with `?id=` listing the affected rows for
    /// edit and remove.
    pub fn target_url(&self, request: &EditorRequest) -> Result<String, EditorError> {
        let ids = match request.action {
            Action::Create => vec![],
            Action::Edit => request.payload_ids(),
            Action::Remove => {
                let ids = match &request.id {
                    Some(ids) if !ids.is_empty() => {
                        debug!(?ids, "remove ids");
                        ids.clone()
                    }
                    _ => {
                        let ids = request.payload_ids();
                        debug!(?ids, "remove ids from data");
                        ids
                    }
                };
                if ids.is_empty() {
                    return Err(EditorError::NoRowIdentifiers);
                }
                ids
            }
        };
        if ids.is_empty() {
            Ok(self.endpoint.clone())
        } else {
            Ok(format!("{}?id={}", self.endpoint, ids.join(",")))
        }
    }

    /// Normalizes the payload in place and resolves the URL it goes to.
    pub fn prepare(&self, request: &mut EditorRequest) -> Result<String, EditorError> {
        if matches!(request.action, Action::Create | Action::Edit) {
            self.normalize_dates(request);
        }
        self.target_url(request)
    }

    /// Sends one request and reports the outcome through `events`.
    ///
    /// Any 2xx answer counts as success, including one whose body carries an
    /// `error` or `fieldErrors`; callers inspect [EditorResponse::rejection].
    /// A remove without any resolvable row identifier fails before anything is sent.
    pub async fn submit<T, E>(
        &self,
        transport: &T,
        mut request: EditorRequest,
        events: &mut E,
    ) -> Result<EditorResponse, EditorError>
    where
        T: Transport,
        E: EditorEvents + ?Sized,
    {
        events.on_before_submit(&mut request);
        let result = match self.prepare(&mut request) {
            Ok(url) => self.send(transport, &url, &request).await,
            Err(e) => {
                error!("No IDs found for {} operation", request.action);
                Err(e)
            }
        };
        match &result {
            Ok(response) => events.on_submit_success(response),
            Err(e) => events.on_submit_error(e),
        }
        result
    }

    async fn send<T: Transport>(
        &self,
        transport: &T,
        url: &str,
        request: &EditorRequest,
    ) -> Result<EditorResponse, EditorError> {
        let body =
            serde_json::to_value(request).map_err(|e| TransportError::Decode(e.to_string()))?;
        debug!(action = %request.action, url, data = %body, "editor request");
        let json = match transport.post_json(url, &body).await {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "editor error response");
                return Err(e.into());
            }
        };
        debug!(response = %json, "editor success response");
        let response: EditorResponse = serde_path_to_error::deserialize(json).map_err(|e| {
            TransportError::Decode(format!("{} at {}", e.inner(), e.path()))
        })?;
        match response.rejection() {
            Some(message) => warn!(%message, "editor answered with an error payload"),
            None => info!(action = %request.action, rows = response.data.len(), "submission accepted"),
        }
        Ok(response)
    }

    pub fn open_create(&self) -> EditForm {
        EditForm::create(&self.fields)
    }

    pub fn open_edit<E>(&self, row_id: &str, row: &Row, events: &mut E) -> EditForm
    where
        E: EditorEvents + ?Sized,
    {
        let mut form = EditForm::edit(&self.fields, row_id, row);
        events.on_init_edit(&mut form);
        form
    }
}

fn truncate_to_date(s: &mut String) {
    let len = normalize_date(s).len();
    s.truncate(len);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn row(v: Value) -> Row {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn normalizes_flat_and_nested_dates() {
        let session = EditSession::books("/api/editor/books");
        let mut request = EditorRequest::edit([
            ("1".to_string(), row(json!({"PublisherInfo.Date": "2024-05-01T00:00:00Z"}))),
            (
                "2".to_string(),
                row(json!({"PublisherInfo": {"Date": "1999-01-02T10:00:00.000Z"}})),
            ),
        ]);
        let url = session.prepare(&mut request).unwrap();
        assert_eq!(url, "/api/editor/books?id=1,2");
        assert_eq!(request.data["1"]["PublisherInfo.Date"], json!("2024-05-01"));
        assert_eq!(request.data["2"]["PublisherInfo"]["Date"], json!("1999-01-02"));
    }

    #[test]
    fn remove_leaves_dates_alone() {
        let session = EditSession::books("/api/editor/books");
        let mut request = EditorRequest::new(Action::Remove)
            .with_row("9", row(json!({"PublisherInfo.Date": "2024-05-01T00:00:00Z"})));
        assert_eq!(session.prepare(&mut request).unwrap(), "/api/editor/books?id=9");
        assert_eq!(request.data["9"]["PublisherInfo.Date"], json!("2024-05-01T00:00:00Z"));
    }
}
