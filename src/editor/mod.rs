//! Edit session adapter: create/edit/remove actions in, one editor-endpoint
//! request out.

pub mod action;
pub mod fields;
pub mod form;
pub mod session;

pub use action::{Action, EditorRequest, EditorResponse};
pub use form::EditForm;
pub use session::EditSession;
