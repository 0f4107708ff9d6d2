mod common;

use common::{TestApp, PASSWORD};
use task_manager::constants::{ERROR_INVALID_LOGIN, ERROR_NOT_SIGNED_IN, SUCCESS_LOGGED_IN, SUCCESS_LOGGED_OUT};
use task_manager::repositories::{LabelRepository, StatusRepository, TaskRepository, UserRepository};

#[tokio::test]
async fn test_index_is_public_and_sets_no_cookie() {
    let mut app = TestApp::spawn().await;
    let response = app.get("/").await;
    assert_eq!(response.status, 200);
    assert!(response.body.contains("Task manager"));
    assert!(response.set_cookie.is_none());
    assert!(app.state.sessions.is_empty().await);
}

#[tokio::test]
async fn test_login_success() {
    let mut app = TestApp::spawn().await;
    app.create_user("john").await;

    let response = app.login("john", PASSWORD).await;
    assert!(response.is_redirect_to("/"));
    let cookie = response.set_cookie.unwrap();
    assert!(cookie.starts_with("sessionid="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));

    let page = app.get("/").await;
    assert!(page.body.contains(SUCCESS_LOGGED_IN));
    assert!(page.body.contains("Log out"));

    // Flash messages are shown once
    let page = app.get("/").await;
    assert!(!page.body.contains(SUCCESS_LOGGED_IN));
}

#[tokio::test]
async fn test_login_failure_rerenders_form() {
    let mut app = TestApp::spawn().await;
    app.create_user("john").await;

    let response = app.login("john", "wrong").await;
    assert_eq!(response.status, 200);
    assert!(response.body.contains(ERROR_INVALID_LOGIN));
    assert!(response.body.contains(r#"value="john""#));

    let response = app.login("John", PASSWORD).await;
    assert_eq!(response.status, 200);
    assert!(response.body.contains(ERROR_INVALID_LOGIN));

    let response = app.login("", "").await;
    assert_eq!(response.status, 200);
    assert!(response.body.contains("This field is required."));
}

#[tokio::test]
async fn test_logout() {
    let mut app = TestApp::spawn().await;
    app.signed_in_as("john").await;
    assert_eq!(app.get("/tasks/").await.status, 200);

    let response = app.post("/logout/", &[]).await;
    assert!(response.is_redirect_to("/"));
    let page = app.follow(&response).await;
    assert!(page.body.contains(SUCCESS_LOGGED_OUT));

    let response = app.get("/tasks/").await;
    assert!(response.is_redirect_to("/login/"));
}

#[tokio::test]
async fn test_logout_via_get() {
    let mut app = TestApp::spawn().await;
    app.signed_in_as("john").await;

    let response = app.get("/logout/").await;
    assert!(response.is_redirect_to("/"));
    assert!(app.get("/tasks/").await.is_redirect_to("/login/"));
}

async fn snapshot(app: &TestApp) -> String {
    let conn = &app.storage().conn;
    format!(
        "{:?} {:?} {:?} {:?}",
        UserRepository::get_all(conn).await.unwrap(),
        StatusRepository::get_all(conn).await.unwrap(),
        LabelRepository::get_all(conn).await.unwrap(),
        TaskRepository::get_all(conn).await.unwrap(),
    )
}

#[tokio::test]
async fn test_protected_pages_redirect_to_login() {
    let mut app = TestApp::spawn().await;
    let user = app.create_user("john").await;
    let status = app.create_status("new").await;
    let label = app.create_label("bug").await;
    let task = app.create_task("Fix it", &user, &user, &status, &[&label]).await;

    let pages = vec![
        "/statuses/".to_string(),
        "/statuses/create/".to_string(),
        format!("/statuses/{}/update/", status.id),
        format!("/statuses/{}/delete/", status.id),
        "/labels/".to_string(),
        "/labels/create/".to_string(),
        format!("/labels/{}/update/", label.id),
        format!("/labels/{}/delete/", label.id),
        "/tasks/".to_string(),
        "/tasks/create/".to_string(),
        format!("/tasks/{}/", task.id),
        format!("/tasks/{}/update/", task.id),
        format!("/tasks/{}/delete/", task.id),
        format!("/users/{}/update/", user.id),
        format!("/users/{}/delete/", user.id),
    ];
    for path in &pages {
        let response = app.get(path).await;
        assert!(response.is_redirect_to("/login/"), "GET {} did not redirect", path);

        let page = app.follow(&response).await;
        assert!(page.body.contains(ERROR_NOT_SIGNED_IN));
    }

    let before = snapshot(&app).await;
    let status_id = status.id.to_string();
    let user_id = user.id.to_string();
    let label_id = label.id.to_string();
    let forms: Vec<(String, Vec<(&str, &str)>)> = vec![
        ("/statuses/create/".to_string(), vec![("name", "done")]),
        (format!("/statuses/{}/update/", status.id), vec![("name", "renamed")]),
        (format!("/statuses/{}/delete/", status.id), vec![]),
        ("/labels/create/".to_string(), vec![("name", "feature")]),
        (format!("/labels/{}/update/", label.id), vec![("name", "renamed")]),
        (format!("/labels/{}/delete/", label.id), vec![]),
        (
            "/tasks/create/".to_string(),
            vec![("name", "Another"), ("status", status_id.as_str()), ("executor", user_id.as_str()), ("labels", label_id.as_str())],
        ),
        (
            format!("/tasks/{}/update/", task.id),
            vec![("name", "Renamed"), ("status", status_id.as_str()), ("executor", user_id.as_str())],
        ),
        (format!("/tasks/{}/delete/", task.id), vec![]),
        (
            format!("/users/{}/update/", user.id),
            vec![
                ("first_name", "Eve"),
                ("last_name", "Intruder"),
                ("username", "eve"),
                ("password1", "other-pass"),
                ("password2", "other-pass"),
            ],
        ),
        (format!("/users/{}/delete/", user.id), vec![]),
    ];
    for (path, fields) in &forms {
        let response = app.post(path, fields).await;
        assert!(response.is_redirect_to("/login/"), "POST {} did not redirect", path);
        assert_eq!(snapshot(&app).await, before, "POST {} changed data", path);
    }
}

#[tokio::test]
async fn test_unknown_session_cookie_is_ignored() {
    let mut app = TestApp::spawn().await;
    app.signed_in_as("john").await;

    app.use_cookie(&format!("sessionid={}", uuid::Uuid::new_v4()));
    let response = app.get("/tasks/").await;
    assert!(response.is_redirect_to("/login/"));
    // A fresh session replaces the unknown one
    assert!(response.set_cookie.is_some());

    app.clear_cookies();
    assert!(app.get("/tasks/").await.is_redirect_to("/login/"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let mut app = TestApp::spawn().await;
    let response = app.get("/nowhere/").await;
    assert_eq!(response.status, 404);
    assert!(response.body.contains("404"));
}

#[tokio::test]
async fn test_anonymous_sessions_do_not_accumulate() {
    let mut app = TestApp::spawn().await;
    for _ in 0..50 {
        app.clear_cookies();
        let response = app.get("/tasks/").await;
        assert!(response.is_redirect_to("/login/"));
        let page = app.follow(&response).await;
        assert!(page.body.contains(ERROR_NOT_SIGNED_IN));
    }
    assert!(app.state.sessions.is_empty().await);

    app.signed_in_as("john").await;
    app.get("/").await;
    assert_eq!(app.state.sessions.len().await, 1);
}
