//! Tickets resource against a mocked backend

use mockito::Matcher;
use ticketdesk_client::tickets::{
    NewTicket, Priority, Status, TicketOrdering, TicketPatch, TicketQuery,
};
use ticketdesk_client::{ApiClient, ApiError, BaseUrl, StaticToken};

const TICKET_JSON: &str = r#"{
    "id": 3,
    "title": "Printer jam",
    "description": "Second floor printer",
    "priority": "High",
    "status": "In Progress",
    "assigned_to": 12,
    "assigned_to_username": "dana",
    "date_created": "2024-03-01T10:00:00Z",
    "date_updated": "2024-03-02T08:30:00Z"
}"#;

fn client(server: &mockito::Server) -> ApiClient {
    ApiClient::new(
        BaseUrl::new(format!("{}/api", server.url())),
        StaticToken::new("desk-token"),
    )
}

#[tokio::test]
async fn test_list_with_filters() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/tickets/")
        .match_header("authorization", "Bearer desk-token")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("priority".into(), "High".into()),
            Matcher::UrlEncoded("status".into(), "In Progress".into()),
            Matcher::UrlEncoded("ordering".into(), "-priority".into()),
        ]))
        .with_status(200)
        .with_body(format!("[{}]", TICKET_JSON))
        .create_async()
        .await;

    let query = TicketQuery {
        priority: Some(Priority::High),
        status: Some(Status::InProgress),
        ordering: Some(TicketOrdering::PriorityDesc),
        ..Default::default()
    };
    let tickets = client(&server)
        .tickets()
        .list(&query)
        .await
        .expect("List should succeed");

    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].id, 3);
    assert_eq!(tickets[0].status, Status::InProgress);
    assert_eq!(tickets[0].assigned_to_username.as_deref(), Some("dana"));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_missing_ticket() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/tickets/99/")
        .with_status(404)
        .with_body(r#"{"detail": "Not found."}"#)
        .create_async()
        .await;

    let result = client(&server).tickets().get(99).await;
    assert!(matches!(result, Err(ApiError::Status { status: 404 })));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_posts_json() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/api/tickets/")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(serde_json::json!({
            "title": "Printer jam",
            "description": "Second floor printer",
            "priority": "High",
            "status": "Open",
            "assigned_to": null
        })))
        .with_status(201)
        .with_body(TICKET_JSON)
        .create_async()
        .await;

    let new_ticket = NewTicket {
        priority: Priority::High,
        ..NewTicket::new("Printer jam", "Second floor printer")
    };
    let ticket = client(&server)
        .tickets()
        .create(&new_ticket)
        .await
        .expect("Create should succeed");
    assert_eq!(ticket.title, "Printer jam");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_update_patches_only_set_fields() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("PATCH", "/api/tickets/3/")
        .match_body(Matcher::Json(serde_json::json!({ "status": "Closed" })))
        .with_status(200)
        .with_body(TICKET_JSON.replace("In Progress", "Closed"))
        .create_async()
        .await;

    let patch = TicketPatch {
        status: Some(Status::Closed),
        ..Default::default()
    };
    let ticket = client(&server)
        .tickets()
        .update(3, &patch)
        .await
        .expect("Update should succeed");
    assert_eq!(ticket.status, Status::Closed);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_replace_puts_full_ticket() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("PUT", "/api/tickets/3/")
        .with_status(200)
        .with_body(TICKET_JSON)
        .create_async()
        .await;

    let ticket = client(&server)
        .tickets()
        .replace(3, &NewTicket::new("Printer jam", "Second floor printer"))
        .await
        .expect("Replace should succeed");
    assert_eq!(ticket.id, 3);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_accepts_no_content() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("DELETE", "/api/tickets/3/")
        .with_status(204)
        .create_async()
        .await;

    client(&server)
        .tickets()
        .delete(3)
        .await
        .expect("Delete should succeed");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_forbidden() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("DELETE", "/api/tickets/3/")
        .with_status(403)
        .create_async()
        .await;

    let result = client(&server).tickets().delete(3).await;
    assert_eq!(result.expect_err("403 must fail").status(), Some(403));

    mock.assert_async().await;
}
