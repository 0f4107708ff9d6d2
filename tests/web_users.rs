mod common;

use common::{TestApp, PASSWORD};
use task_manager::auth::password::verify_password;
use task_manager::constants::{
    ERROR_INVALID_USERNAME, ERROR_PASSWORD_MISMATCH, ERROR_USERNAME_TAKEN, ERROR_USER_FOREIGN, ERROR_USER_IN_USE,
    SUCCESS_USER_DELETED, SUCCESS_USER_REGISTERED, SUCCESS_USER_UPDATED,
};
use task_manager::repositories::UserRepository;

fn registration<'a>(username: &'a str, password1: &'a str, password2: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("first_name", "John"),
        ("last_name", "Doe"),
        ("username", username),
        ("password1", password1),
        ("password2", password2),
    ]
}

async fn user_count(app: &TestApp) -> usize {
    UserRepository::get_all(&app.storage().conn).await.unwrap().len()
}

#[tokio::test]
async fn test_user_list_is_public() {
    let mut app = TestApp::spawn().await;
    app.create_user("john").await;

    let response = app.get("/users/").await;
    assert_eq!(response.status, 200);
    assert!(response.body.contains("john-first john-last"));
}

#[tokio::test]
async fn test_registration() {
    let mut app = TestApp::spawn().await;
    assert_eq!(app.get("/users/create/").await.status, 200);

    let response = app.post("/users/create/", &registration("johndoe", "abc", "abc")).await;
    assert!(response.is_redirect_to("/login/"));
    let page = app.follow(&response).await;
    assert!(page.body.contains(SUCCESS_USER_REGISTERED));

    let user = UserRepository::get_by_username(&app.storage().conn, "johndoe")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.full_name(), "John Doe");
    assert_ne!(user.password_hash, "abc");
    assert!(verify_password("abc", &user.password_hash));

    assert!(app.login("johndoe", "abc").await.is_redirect_to("/"));
}

#[tokio::test]
async fn test_registration_errors() {
    let mut app = TestApp::spawn().await;
    app.create_user("taken").await;

    let response = app.post("/users/create/", &[]).await;
    assert_eq!(response.status, 200);
    assert!(response.body.contains("This field is required."));

    let response = app.post("/users/create/", &registration("johndoe", "abc", "abd")).await;
    assert_eq!(response.status, 200);
    assert!(response.body.contains(ERROR_PASSWORD_MISMATCH));

    let response = app.post("/users/create/", &registration("johndoe", "ab", "ab")).await;
    assert_eq!(response.status, 200);
    assert!(response
        .body
        .contains("The password entered is too short. It must contain at least 3 characters."));

    let response = app.post("/users/create/", &registration("taken", "abc", "abc")).await;
    assert_eq!(response.status, 200);
    assert!(response.body.contains(ERROR_USERNAME_TAKEN));

    let response = app.post("/users/create/", &registration("john doe!", "abc", "abc")).await;
    assert_eq!(response.status, 200);
    assert!(response.body.contains(ERROR_INVALID_USERNAME));

    let long = "a".repeat(151);
    let response = app.post("/users/create/", &registration(&long, "abc", "abc")).await;
    assert_eq!(response.status, 200);
    assert!(response.body.contains("at most 150 characters"));

    // Nothing but the seeded user
    assert_eq!(user_count(&app).await, 1);
}

#[tokio::test]
async fn test_update_own_account() {
    let mut app = TestApp::spawn().await;
    let user = app.signed_in_as("john").await;
    let path = format!("/users/{}/update/", user.id);

    let page = app.get(&path).await;
    assert_eq!(page.status, 200);
    assert!(page.body.contains(r#"value="john""#));

    let response = app.post(&path, &registration("johnny", "newpass", "newpass")).await;
    assert!(response.is_redirect_to("/users/"));
    let page = app.follow(&response).await;
    assert!(page.body.contains(SUCCESS_USER_UPDATED));

    let updated = UserRepository::get_by_id(&app.storage().conn, user.id).await.unwrap().unwrap();
    assert_eq!(updated.username, "johnny");
    assert!(verify_password("newpass", &updated.password_hash));

    // Still signed in after changing the password
    assert_eq!(app.get("/tasks/").await.status, 200);
}

#[tokio::test]
async fn test_update_keeps_own_username() {
    let mut app = TestApp::spawn().await;
    let user = app.signed_in_as("john").await;

    let response = app
        .post(&format!("/users/{}/update/", user.id), &registration("john", PASSWORD, PASSWORD))
        .await;
    assert!(response.is_redirect_to("/users/"));
}

#[tokio::test]
async fn test_cannot_modify_another_user() {
    let mut app = TestApp::spawn().await;
    let other = app.create_user("other").await;
    app.signed_in_as("john").await;

    for path in [
        format!("/users/{}/update/", other.id),
        format!("/users/{}/delete/", other.id),
    ] {
        let response = app.get(&path).await;
        assert!(response.is_redirect_to("/users/"));
        let page = app.follow(&response).await;
        assert!(page.body.contains(ERROR_USER_FOREIGN));
    }

    let response = app
        .post(&format!("/users/{}/update/", other.id), &registration("hijacked", "abc", "abc"))
        .await;
    assert!(response.is_redirect_to("/users/"));
    let response = app.post(&format!("/users/{}/delete/", other.id), &[]).await;
    assert!(response.is_redirect_to("/users/"));

    let unchanged = UserRepository::get_by_id(&app.storage().conn, other.id).await.unwrap().unwrap();
    assert_eq!(unchanged.username, "other");
}

#[tokio::test]
async fn test_account_pages_require_login() {
    let mut app = TestApp::spawn().await;
    let user = app.create_user("john").await;

    let response = app.get(&format!("/users/{}/update/", user.id)).await;
    assert!(response.is_redirect_to("/login/"));
    let response = app.post(&format!("/users/{}/delete/", user.id), &[]).await;
    assert!(response.is_redirect_to("/login/"));
    assert_eq!(user_count(&app).await, 1);
}

#[tokio::test]
async fn test_delete_own_account() {
    let mut app = TestApp::spawn().await;
    let user = app.signed_in_as("john").await;
    let path = format!("/users/{}/delete/", user.id);

    let page = app.get(&path).await;
    assert_eq!(page.status, 200);
    assert!(page
        .body
        .contains("Are you sure you want to delete the john-first john-last?"));

    let response = app.post(&path, &[]).await;
    assert!(response.is_redirect_to("/users/"));
    let page = app.follow(&response).await;
    assert!(page.body.contains(SUCCESS_USER_DELETED));
    assert_eq!(user_count(&app).await, 0);

    // The session no longer belongs to anyone
    assert!(app.get("/tasks/").await.is_redirect_to("/login/"));
}

#[tokio::test]
async fn test_delete_user_in_use() {
    let mut app = TestApp::spawn().await;
    let user = app.signed_in_as("john").await;
    let status = app.create_status("new").await;
    app.create_task("Work", &user, &user, &status, &[]).await;

    let response = app.post(&format!("/users/{}/delete/", user.id), &[]).await;
    assert!(response.is_redirect_to("/users/"));
    let page = app.follow(&response).await;
    assert!(page.body.contains(ERROR_USER_IN_USE));
    assert!(!page.body.contains(SUCCESS_USER_DELETED));
    assert_eq!(user_count(&app).await, 1);
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let mut app = TestApp::spawn().await;
    app.signed_in_as("john").await;

    assert_eq!(app.get("/users/999/update/").await.status, 404);
    assert_eq!(app.get("/users/abc/delete/").await.status, 404);
}
