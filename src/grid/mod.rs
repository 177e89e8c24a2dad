//! Server-driven catalog table: its declaration, cell rendering and the
//! session that owns the current page.

pub mod config;
pub mod render;
pub mod request;
pub mod session;

pub use config::{Button, Column, GridConfig, Notice};
pub use render::Renderer;
pub use request::{Page, SortDir};
pub use session::{GridSession, RenderedRow};
