//! HTTP behavior of the Todoist client against a stub server.

use uni_mirror_core::{RemoteSource, SyncError};
use uni_mirror_todoist::TodoistClient;
use wiremock::matchers::{bearer_token, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> TodoistClient {
    TodoistClient::with_base_url("secret-token", server.uri())
        .unwrap_or_else(|err| panic!("client build: {err}"))
}

#[tokio::test]
async fn lists_projects_with_bearer_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(bearer_token("secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[{"id": "P1", "name": "UNI"}, {"id": "P2", "name": "Inbox"}]"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let projects = client(&server)
        .list_projects()
        .await
        .unwrap_or_else(|err| panic!("list projects: {err}"));
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].id, "P1");
    assert_eq!(projects[0].name, "UNI");
}

#[tokio::test]
async fn scopes_sections_and_tasks_to_the_project() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sections"))
        .and(query_param("project_id", "P1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[{"id": "S1", "name": "Algorithms", "order": 1}]"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .and(query_param("project_id", "P1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[{"id": "T1", "content": "HW1", "labels": ["abgabe"], "due": {"date": "2024-01-10"}}]"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let client = client(&server);
    let sections = client
        .list_sections("P1")
        .await
        .unwrap_or_else(|err| panic!("list sections: {err}"));
    assert_eq!(sections[0].name, "Algorithms");

    let tasks = client
        .list_tasks("P1")
        .await
        .unwrap_or_else(|err| panic!("list tasks: {err}"));
    assert_eq!(tasks[0].content, "HW1");
    let due = tasks[0].due.clone().unwrap_or_else(|| panic!("due expected"));
    assert_eq!(due.date.as_deref(), Some("2024-01-10"));
}

#[tokio::test]
async fn non_success_status_maps_to_rejected_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let Err(err) = client(&server).list_projects().await else {
        panic!("403 must not succeed");
    };
    assert!(matches!(
        err,
        SyncError::RemoteRejected { status: 403, ref body } if body == "Forbidden"
    ));
}

#[tokio::test]
async fn undecodable_body_maps_to_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"not": "a list"}"#, "application/json"))
        .mount(&server)
        .await;

    let Err(err) = client(&server).list_projects().await else {
        panic!("malformed body must not decode");
    };
    assert!(matches!(err, SyncError::RemoteMalformed(_)));
}

#[tokio::test]
async fn unreachable_host_maps_to_unavailable() {
    // Bind a listener to reserve a port, then drop it so connections fail.
    let listener = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap_or_else(|err| panic!("bind: {err}"));
    let addr = listener
        .local_addr()
        .unwrap_or_else(|err| panic!("local addr: {err}"));
    drop(listener);

    let client = TodoistClient::with_base_url("secret-token", format!("http://{addr}"))
        .unwrap_or_else(|err| panic!("client build: {err}"));
    let Err(err) = client.list_projects().await else {
        panic!("dead host must not succeed");
    };
    assert!(matches!(err, SyncError::RemoteUnavailable(_)));
}
