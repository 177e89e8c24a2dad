use tracing::{debug, info, warn};

use crate::{
    config::Config,
    editor::{EditForm, EditSession, EditorRequest, EditorResponse},
    error::{EditorError, GridError, TransportError},
    grid::{
        config::{GridConfig, Notice},
        request::{GridState, Order, Page, ServerResponse, SortDir},
    },
    traits::{EditorEvents, Transport},
    types::row::{get_path, row_id, Row},
};

/// A rendered row: its identifier and one display string per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub id:    Option<String>,
    pub cells: Vec<String>,
}

/// The grid and its (optional) editor for the lifetime of one view.
///
/// Without an editor the session is read-only: the configuration carries only
/// export buttons and a single [Notice::EditingUnavailable] is shown.
pub struct GridSession<T> {
    transport: T,
    config:    GridConfig,
    editor:    Option<EditSession>,
    state:     GridState,
    page:      Option<Page>,
    notices:   Vec<Notice>,
}

impl<T: Transport> GridSession<T> {
    pub fn new(transport: T, books_url: &str, page_length: u32, editor: Option<EditSession>) -> Self {
        let mut session = Self {
            transport,
            config: GridConfig::books(books_url, page_length, editor.is_some()),
            editor,
            state: GridState::new(u64::from(page_length)),
            page: None,
            notices: vec![],
        };
        session.configure();
        session
    }

    pub fn from_config(transport: T, config: &Config) -> Self {
        let editor = config
            .editing
            .then(|| EditSession::books(config.editor_path.clone()));
        Self::new(transport, &config.books_path, config.page_length, editor)
    }

    /// Rebuilds the table declaration for the current editing capability.
    /// Safe to call repeatedly: the read-only notice is only ever added once.
    pub fn configure(&mut self) {
        let editing = self.editor.is_some();
        self.config = GridConfig::books(
            &self.config.ajax.url,
            self.config.page_length,
            editing,
        );
        if !editing && !self.notices.contains(&Notice::EditingUnavailable) {
            info!("editor unavailable, grid is read-only");
            self.notices.push(Notice::EditingUnavailable);
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn editor(&self) -> Option<&EditSession> {
        self.editor.as_ref()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    /// Paging/order/search to use on the next [reload](Self::reload).
    pub fn state_mut(&mut self) -> &mut GridState {
        &mut self.state
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches the current page from the server, replacing whatever was held.
    pub async fn reload(&mut self) -> Result<&Page, GridError> {
        self.state.draw += 1;
        let request = self.state.to_request(&self.config.columns);
        debug!(draw = request.draw, start = request.start, search = %request.search.value, "grid request");
        let body = serde_json::to_value(&request)
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        let json = self.transport.post_json(&self.config.ajax.url, &body).await?;
        let response: ServerResponse =
            serde_path_to_error::deserialize(json).map_err(|e| GridError::Response {
                path:    e.path().to_string(),
                message: e.inner().to_string(),
            })?;
        if let Some(error) = response.error.filter(|e| !e.is_empty()) {
            return Err(GridError::Server(error));
        }
        if response.draw != self.state.draw {
            warn!(expected = self.state.draw, got = response.draw, "draw counter mismatch");
        }
        let page = Page {
            draw:             response.draw,
            records_total:    response.records_total,
            records_filtered: response.records_filtered,
            rows:             response.data,
        };
        Ok(&*self.page.insert(page))
    }

    /// Moves to the zero-based page `index` and reloads.
    pub async fn go_to_page(&mut self, index: u64) -> Result<&Page, GridError> {
        self.state.seek(index)?;
        self.reload().await
    }

    /// Advances one page, stopping at the last. Loads the current page first
    /// if nothing has been fetched yet, so the page count is known.
    pub async fn next_page(&mut self) -> Result<&Page, GridError> {
        if self.page.is_none() {
            self.reload().await?;
        }
        let last = self
            .page
            .as_ref()
            .map(|p| p.page_count(self.state.length) - 1)
            .unwrap_or(0);
        let index = self.state.page_index().saturating_add(1).min(last);
        self.go_to_page(index).await
    }

    pub async fn previous_page(&mut self) -> Result<&Page, GridError> {
        let index = self.state.page_index().saturating_sub(1);
        self.go_to_page(index).await
    }

    /// Orders by a single column, named by data path or title, and returns to
    /// the first page.
    pub async fn sort(&mut self, column: &str, dir: SortDir) -> Result<&Page, GridError> {
        let column = self
            .config
            .column_index(column)
            .ok_or_else(|| GridError::UnknownColumn(column.to_string()))?;
        self.state.order = vec![Order { column, dir }];
        self.state.start = 0;
        self.reload().await
    }

    pub async fn search(&mut self, text: &str) -> Result<&Page, GridError> {
        self.state.search = text.to_string();
        self.state.start = 0;
        self.reload().await
    }

    /// Hands the request to the editor and, once the server accepts it,
    /// reloads the current page exactly once.
    pub async fn submit<E>(
        &mut self,
        request: EditorRequest,
        events: &mut E,
    ) -> Result<EditorResponse, EditorError>
    where
        E: EditorEvents + ?Sized,
    {
        let editor = match &self.editor {
            Some(editor) => editor,
            None => {
                let e = EditorError::EditingUnavailable;
                events.on_submit_error(&e);
                return Err(e);
            }
        };
        let response = editor.submit(&self.transport, request, events).await?;
        if let Err(e) = self.reload().await {
            warn!(error = %e, "reload after submit failed");
        }
        Ok(response)
    }

    pub async fn remove_rows<E>(
        &mut self,
        ids: &[String],
        events: &mut E,
    ) -> Result<EditorResponse, EditorError>
    where
        E: EditorEvents + ?Sized,
    {
        self.submit(EditorRequest::remove(ids.iter().cloned()), events).await
    }

    pub fn open_create(&self) -> Result<EditForm, EditorError> {
        self.editor
            .as_ref()
            .map(EditSession::open_create)
            .ok_or(EditorError::EditingUnavailable)
    }

    /// Opens the edit form for a row of the current page.
    pub fn open_edit<E>(&self, id: &str, events: &mut E) -> Result<EditForm, EditorError>
    where
        E: EditorEvents + ?Sized,
    {
        let editor = self.editor.as_ref().ok_or(EditorError::EditingUnavailable)?;
        let row = self
            .find_row(id)
            .ok_or_else(|| EditorError::UnknownRow(id.to_string()))?;
        Ok(editor.open_edit(id, row, events))
    }

    pub fn find_row(&self, id: &str) -> Option<&Row> {
        self.page
            .as_ref()?
            .rows
            .iter()
            .find(|r| row_id(r).as_deref() == Some(id))
    }

    pub fn rendered_rows(&self) -> Vec<RenderedRow> {
        let rows = match &self.page {
            Some(page) => &page.rows,
            None => return vec![],
        };
        rows.iter()
            .map(|row| RenderedRow {
                id:    row_id(row),
                cells: self
                    .config
                    .columns
                    .iter()
                    .map(|c| c.render.render(get_path(row, &c.data)))
                    .collect(),
            })
            .collect()
    }

    /// `Showing 11 to 20 of 57 entries`, or the empty variant.
    pub fn summary(&self) -> String {
        let page = match &self.page {
            Some(page) => page,
            None => return "Not loaded".into(),
        };
        if page.rows.is_empty() {
            return "Showing 0 to 0 of 0 entries".into();
        }
        let first = self.state.start + 1;
        let last = self.state.start + page.rows.len() as u64;
        let mut summary = format!("Showing {first} to {last} of {} entries", page.records_filtered);
        if page.records_filtered != page.records_total {
            summary.push_str(&format!(" (filtered from {} total entries)", page.records_total));
        }
        summary
    }
}
