mod common;

use common::TestApp;
use task_manager::constants::{
    ERROR_STATUS_EXISTS, ERROR_STATUS_IN_USE, SUCCESS_STATUS_CREATED, SUCCESS_STATUS_DELETED, SUCCESS_STATUS_UPDATED,
};
use task_manager::repositories::StatusRepository;

async fn status_names(app: &TestApp) -> Vec<String> {
    StatusRepository::get_all(&app.storage().conn)
        .await
        .unwrap()
        .into_iter()
        .map(|status| status.name)
        .collect()
}

#[tokio::test]
async fn test_create_status() {
    let mut app = TestApp::spawn().await;
    app.signed_in_as("john").await;

    let page = app.get("/statuses/create/").await;
    assert_eq!(page.status, 200);
    assert!(page.body.contains("Create status"));

    let response = app.post("/statuses/create/", &[("name", "In progress")]).await;
    assert!(response.is_redirect_to("/statuses/"));
    let page = app.follow(&response).await;
    assert!(page.body.contains(SUCCESS_STATUS_CREATED));
    assert!(page.body.contains("In progress"));
    assert_eq!(status_names(&app).await, vec!["In progress"]);
}

#[tokio::test]
async fn test_create_status_errors() {
    let mut app = TestApp::spawn().await;
    app.signed_in_as("john").await;
    app.create_status("new").await;

    let response = app.post("/statuses/create/", &[("name", "")]).await;
    assert_eq!(response.status, 200);
    assert!(response.body.contains("This field is required."));

    let response = app.post("/statuses/create/", &[("name", "new")]).await;
    assert_eq!(response.status, 200);
    assert!(response.body.contains(ERROR_STATUS_EXISTS));

    let long = "s".repeat(101);
    let response = app.post("/statuses/create/", &[("name", long.as_str())]).await;
    assert_eq!(response.status, 200);
    assert!(response.body.contains("at most 100 characters (it has 101)"));

    assert_eq!(status_names(&app).await, vec!["new"]);
}

#[tokio::test]
async fn test_update_status() {
    let mut app = TestApp::spawn().await;
    app.signed_in_as("john").await;
    let status = app.create_status("new").await;
    app.create_status("done").await;
    let path = format!("/statuses/{}/update/", status.id);

    let page = app.get(&path).await;
    assert!(page.body.contains("Update status"));
    assert!(page.body.contains(r#"value="new""#));

    let response = app.post(&path, &[("name", "done")]).await;
    assert_eq!(response.status, 200);
    assert!(response.body.contains(ERROR_STATUS_EXISTS));

    // Saving the unchanged name is fine
    let response = app.post(&path, &[("name", "new")]).await;
    assert!(response.is_redirect_to("/statuses/"));

    let response = app.post(&path, &[("name", "fresh")]).await;
    assert!(response.is_redirect_to("/statuses/"));
    let page = app.follow(&response).await;
    assert!(page.body.contains(SUCCESS_STATUS_UPDATED));
    assert_eq!(status_names(&app).await, vec!["fresh", "done"]);
}

#[tokio::test]
async fn test_delete_status() {
    let mut app = TestApp::spawn().await;
    app.signed_in_as("john").await;
    let status = app.create_status("new").await;
    let path = format!("/statuses/{}/delete/", status.id);

    let page = app.get(&path).await;
    assert!(page.body.contains("Status deleting"));
    assert!(page.body.contains("Are you sure you want to delete the new?"));

    let response = app.post(&path, &[]).await;
    assert!(response.is_redirect_to("/statuses/"));
    let page = app.follow(&response).await;
    assert!(page.body.contains(SUCCESS_STATUS_DELETED));
    assert!(status_names(&app).await.is_empty());
}

#[tokio::test]
async fn test_delete_status_in_use() {
    let mut app = TestApp::spawn().await;
    let user = app.signed_in_as("john").await;
    let status = app.create_status("new").await;
    app.create_task("Work", &user, &user, &status, &[]).await;

    let response = app.post(&format!("/statuses/{}/delete/", status.id), &[]).await;
    assert!(response.is_redirect_to("/statuses/"));
    let page = app.follow(&response).await;
    assert!(page.body.contains(ERROR_STATUS_IN_USE));
    assert_eq!(status_names(&app).await, vec!["new"]);
}

#[tokio::test]
async fn test_unknown_status_is_not_found() {
    let mut app = TestApp::spawn().await;
    app.signed_in_as("john").await;

    assert_eq!(app.get("/statuses/404/update/").await.status, 404);
    assert_eq!(app.post("/statuses/404/delete/", &[]).await.status, 404);
}

#[tokio::test]
async fn test_status_routes_require_login() {
    let mut app = TestApp::spawn().await;
    let response = app.post("/statuses/create/", &[("name", "new")]).await;
    assert!(response.is_redirect_to("/login/"));
    assert!(status_names(&app).await.is_empty());
}

#[tokio::test]
async fn test_concurrent_duplicate_creates_never_fail() {
    let mut app = TestApp::spawn().await;
    app.signed_in_as("john").await;

    let statuses = app.post_concurrently("/statuses/create/", &[("name", "same")], 16).await;
    for status in &statuses {
        assert!(*status == 303 || *status == 200, "unexpected status {}", status);
    }
    assert_eq!(statuses.iter().filter(|status| **status == 303).count(), 1);
    assert_eq!(status_names(&app).await, vec!["same"]);
}
