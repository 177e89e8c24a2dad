use serde_json::Value;

use crate::{
    editor::{
        action::{EditorRequest, EditorResponse},
        form::EditForm,
    },
    error::{EditorError, TransportError},
};

/// Sends one JSON body to an endpoint path and returns the decoded JSON answer.
///
/// `url` is relative to whatever base the implementation is bound to and may carry
/// a query string.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError>;
}

impl<T: Transport> Transport for &T {
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError> {
        (**self).post_json(url, body).await
    }
}

/// Lifecycle hooks of an edit session, called synchronously in the order the
/// events happen.
pub trait EditorEvents {
    /// An edit form was opened for an existing row.
    fn on_init_edit(&mut self, _form: &mut EditForm) {}

    /// Runs before the request is normalized and sent.
    fn on_before_submit(&mut self, _request: &mut EditorRequest) {}

    fn on_submit_success(&mut self, _response: &EditorResponse) {}

    fn on_submit_error(&mut self, _error: &EditorError) {}
}

impl EditorEvents for () {}
