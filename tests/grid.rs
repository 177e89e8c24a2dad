mod common;

use bookgrid::{
    config::{Config, BOOKS_PATH},
    editor::{EditSession, EditorRequest},
    error::{EditorError, GridError, TransportError},
    grid::{Button, GridSession, Notice, SortDir},
};
use common::{book, to_row, RecordedEvents, RecordingTransport, EDITOR_PATH};
use pretty_assertions::assert_eq;
use serde_json::json;

fn editing_session(transport: &RecordingTransport) -> GridSession<&RecordingTransport> {
    GridSession::new(transport, BOOKS_PATH, 10, Some(EditSession::books(EDITOR_PATH)))
}

fn catalog(n: usize) -> Vec<serde_json::Value> {
    (0..n)
        .map(|i| book(&format!("row_{i}"), &format!("Book {i}")))
        .collect()
}

#[tokio::test]
async fn successful_mutation_reloads_exactly_once() {
    let transport = RecordingTransport::with_rows(catalog(3));
    let mut session = editing_session(&transport);
    session.reload().await.unwrap();
    transport.calls.borrow_mut().clear();

    let mut events = RecordedEvents::default();
    let request = EditorRequest::create(to_row(json!({"Title": "Frozen Colony"})));
    session.submit(request, &mut events).await.unwrap();

    assert_eq!(
        transport.urls(),
        vec![EDITOR_PATH.to_string(), BOOKS_PATH.to_string()]
    );
    assert_eq!(events.successes.len(), 1);
}

#[tokio::test]
async fn each_mutation_gets_its_own_reload() {
    let transport = RecordingTransport::with_rows(catalog(3));
    let mut session = editing_session(&transport);
    let mut events = RecordedEvents::default();
    session
        .remove_rows(&["row_1".to_string()], &mut events)
        .await
        .unwrap();
    let edit = EditorRequest::edit([("row_2".to_string(), to_row(json!({"Pages": "99"})))]);
    session.submit(edit, &mut events).await.unwrap();
    assert_eq!(
        transport.urls(),
        vec![
            "/api/editor/books?id=row_1".to_string(),
            BOOKS_PATH.to_string(),
            "/api/editor/books?id=row_2".to_string(),
            BOOKS_PATH.to_string(),
        ]
    );
}

#[tokio::test]
async fn error_payload_with_success_status_still_reloads_once() {
    let transport = RecordingTransport::with_rows(catalog(3));
    transport.respond_to_editor(Ok(json!({"data": [], "error": "duplicate title"})));
    let mut session = editing_session(&transport);
    let mut events = RecordedEvents::default();
    let request = EditorRequest::create(to_row(json!({"Title": "Book 1"})));
    let response = session.submit(request, &mut events).await.unwrap();
    assert_eq!(response.rejection().as_deref(), Some("duplicate title"));
    assert_eq!(
        transport.urls(),
        vec![EDITOR_PATH.to_string(), BOOKS_PATH.to_string()]
    );
    assert_eq!(events.successes.len(), 1);
    assert!(events.errors.is_empty());
}

#[tokio::test]
async fn failed_mutation_does_not_reload() {
    let transport = RecordingTransport::with_rows(catalog(3));
    transport.respond_to_editor(Err(TransportError::Network("connection refused".into())));
    let mut session = editing_session(&transport);
    let mut events = RecordedEvents::default();
    let result = session
        .submit(EditorRequest::remove(["row_0"]), &mut events)
        .await;
    assert!(matches!(result, Err(EditorError::Transport(TransportError::Network(_)))));
    assert_eq!(transport.urls(), vec!["/api/editor/books?id=row_0".to_string()]);
}

#[tokio::test]
async fn read_only_grid_offers_exports_and_one_notice() {
    let transport = RecordingTransport::with_rows(catalog(2));
    let mut session = GridSession::new(&transport, BOOKS_PATH, 10, None);
    session.configure();
    session.configure();

    assert_eq!(session.config().buttons, Button::EXPORT.to_vec());
    assert!(!session.config().editing());
    assert_eq!(session.notices(), &[Notice::EditingUnavailable]);

    let mut events = RecordedEvents::default();
    let result = session
        .submit(EditorRequest::remove(["row_0"]), &mut events)
        .await;
    assert_eq!(result, Err(EditorError::EditingUnavailable));
    assert_eq!(events.errors, vec![EditorError::EditingUnavailable]);
    assert!(transport.calls.borrow().is_empty());
    assert_eq!(session.open_create(), Err(EditorError::EditingUnavailable));

    session.reload().await.unwrap();
    assert_eq!(session.rendered_rows().len(), 2);
}

#[test]
fn editing_disabled_in_config_means_read_only() {
    let transport = RecordingTransport::default();
    let config = Config {
        editing: false,
        ..Config::default()
    };
    let session = GridSession::from_config(&transport, &config);
    assert!(session.editor().is_none());
    assert_eq!(session.notices().len(), 1);
}

#[tokio::test]
async fn paging_requests_the_right_window() {
    let transport = RecordingTransport::with_rows(catalog(25));
    let mut session = editing_session(&transport);
    session.reload().await.unwrap();
    let page = session.go_to_page(2).await.unwrap();
    assert_eq!(page.rows.len(), 5);
    assert_eq!(page.records_filtered, 25);
    assert_eq!(session.summary(), "Showing 21 to 25 of 25 entries");

    session.next_page().await.unwrap();
    assert_eq!(session.state().start, 20);
    session.previous_page().await.unwrap();
    assert_eq!(session.state().start, 10);

    let draws: Vec<u64> = transport
        .grid_requests()
        .iter()
        .map(|r| r["draw"].as_u64().unwrap())
        .collect();
    assert_eq!(draws, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn huge_page_index_is_rejected_without_a_request() {
    let transport = RecordingTransport::with_rows(catalog(3));
    let mut session = editing_session(&transport);
    let result = session.go_to_page(u64::MAX / 2).await;
    assert_eq!(result.err(), Some(GridError::PageOutOfRange(u64::MAX / 2)));
    assert_eq!(session.state().start, 0);
    assert!(transport.calls.borrow().is_empty());
}

#[tokio::test]
async fn next_page_loads_first_when_nothing_is_shown() {
    let transport = RecordingTransport::with_rows(catalog(25));
    let mut session = editing_session(&transport);
    let page = session.next_page().await.unwrap();
    assert_eq!(page.rows.len(), 10);
    assert_eq!(session.state().start, 10);
    let starts: Vec<u64> = transport
        .grid_requests()
        .iter()
        .map(|r| r["start"].as_u64().unwrap())
        .collect();
    assert_eq!(starts, vec![0, 10]);
}

#[tokio::test]
async fn sort_and_search_reset_to_first_page() {
    let transport = RecordingTransport::with_rows(catalog(25));
    let mut session = editing_session(&transport);
    session.go_to_page(1).await.unwrap();
    session.sort("author", SortDir::Desc).await.unwrap();
    let request = transport.last_body();
    assert_eq!(request["order"], json!([{"column": 1, "dir": "desc"}]));
    assert_eq!(request["start"], json!(0));
    assert_eq!(request["columns"][2]["data"], json!("PublisherInfo.Date"));

    session.go_to_page(1).await.unwrap();
    session.search("neon").await.unwrap();
    let request = transport.last_body();
    assert_eq!(request["search"], json!({"value": "neon", "regex": false}));
    assert_eq!(request["start"], json!(0));
}

#[tokio::test]
async fn unknown_sort_column_is_rejected_locally() {
    let transport = RecordingTransport::default();
    let mut session = editing_session(&transport);
    let result = session.sort("ISBN", SortDir::Asc).await;
    assert_eq!(result.err(), Some(GridError::UnknownColumn("ISBN".into())));
    assert!(transport.calls.borrow().is_empty());
}

#[tokio::test]
async fn rows_render_through_column_rules() {
    let transport = RecordingTransport::with_rows(vec![book("a", "Silent Sky"), json!({
        "DT_RowId": "b",
        "Title": "Toxic Earth",
        "Author": "Sage Ivanov",
        "PublisherInfo": {"Date": "sometime"},
        "Pages": 188,
        "Themes": null,
        "Rating": "2.5"
    })]);
    let mut session = editing_session(&transport);
    session.reload().await.unwrap();
    let rows = session.rendered_rows();
    assert_eq!(rows[0].id.as_deref(), Some("a"));
    assert_eq!(
        rows[0].cells,
        vec![
            "Silent Sky",
            "Quinn Novak",
            "May 1, 2024",
            "Surveillance state, Mind control",
            "320",
            "4.0"
        ]
    );
    assert_eq!(
        rows[1].cells,
        vec!["Toxic Earth", "Sage Ivanov", "sometime", "", "188", "2.5"]
    );
}

#[tokio::test]
async fn edit_form_opens_for_rows_on_the_page() {
    let transport = RecordingTransport::with_rows(catalog(2));
    let mut session = editing_session(&transport);
    session.reload().await.unwrap();

    let mut events = RecordedEvents::default();
    let form = session.open_edit("row_1", &mut events).unwrap();
    assert_eq!(form.get("PublisherInfo.Date"), Some(&json!("2024-05-01")));
    assert_eq!(form.get("Title"), Some(&json!("Book 1")));
    assert_eq!(events.opened.len(), 1);

    assert_eq!(
        session.open_edit("row_9", &mut events),
        Err(EditorError::UnknownRow("row_9".into()))
    );
}

#[tokio::test]
async fn server_error_field_fails_the_reload() {
    struct Failing;
    impl bookgrid::traits::Transport for Failing {
        async fn post_json(
            &self,
            _url: &str,
            body: &serde_json::Value,
        ) -> Result<serde_json::Value, TransportError> {
            Ok(json!({
                "error": "collection not found",
                "data": [],
                "draw": body["draw"],
                "recordsTotal": 0,
                "recordsFiltered": 0
            }))
        }
    }
    let mut session = GridSession::new(Failing, BOOKS_PATH, 10, None);
    let result = session.reload().await;
    assert_eq!(result.err(), Some(GridError::Server("collection not found".into())));
    assert!(session.page().is_none());
}

#[test]
fn grid_declaration_matches_widget_options() {
    let transport = RecordingTransport::default();
    let session = editing_session(&transport);
    let declaration = serde_json::to_value(session.config()).unwrap();
    assert_eq!(declaration["serverSide"], json!(true));
    assert_eq!(declaration["rowId"], json!("DT_RowId"));
    assert_eq!(declaration["pageLength"], json!(10));
    assert_eq!(
        declaration["buttons"],
        json!([{"extend": "create"}, {"extend": "edit"}, {"extend": "remove"}])
    );
    assert_eq!(
        declaration["ajax"],
        json!({"url": "/api/books", "type": "POST", "contentType": "application/json"})
    );
    assert_eq!(declaration["columns"][2]["className"], json!("dt-center"));
    assert_eq!(declaration["columns"][2]["render"], json!("longDate"));
    assert_eq!(declaration["columns"][3]["render"], json!("listJoin"));
    assert!(session.notices().is_empty());
}
