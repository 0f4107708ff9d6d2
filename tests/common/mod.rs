//! Test infrastructure for integration tests
//!
//! Each [`TestApp`] serves the full router on an ephemeral port backed by its
//! own in-memory database. Requests go through a real HTTP client that never
//! follows redirects and carries the session cookie between calls.

#![allow(dead_code)]

use std::net::SocketAddr;

use reqwest::header::{COOKIE, LOCATION, SET_COOKIE};
use task_manager::auth::password::hash_password;
use task_manager::config::{Config, DatabaseConfig};
use task_manager::entities::{label, status, task, user};
use task_manager::repositories::{
    LabelRepository, NewUser, StatusRepository, TaskChanges, TaskRepository, UserRepository,
};
use task_manager::storage::Storage;
use task_manager::web::{self, AppState};

pub const PASSWORD: &str = "s3cret-pass";

/// Response with the parts the tests look at.
#[derive(Debug)]
pub struct TestResponse {
    pub status: u16,
    pub location: Option<String>,
    /// Raw `Set-Cookie` header, if the server sent one
    pub set_cookie: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn is_redirect_to(&self, path: &str) -> bool {
        (300..400).contains(&self.status) && self.location.as_deref() == Some(path)
    }
}

/// Running server plus a cookie-carrying client
pub struct TestApp {
    pub addr: SocketAddr,
    pub state: AppState,
    client: reqwest::Client,
    cookie: Option<String>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let storage = Storage::in_memory().await.unwrap();
        let config = Config {
            database: DatabaseConfig::in_memory(),
            ..Config::default()
        };
        let state = AppState::new(storage, config);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = web::router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            addr,
            state,
            client,
            cookie: None,
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.state.storage
    }

    /// Forget the session cookie, as a fresh browser would.
    pub fn clear_cookies(&mut self) {
        self.cookie = None;
    }

    /// Send `cookie` (a `name=value` pair) from now on.
    pub fn use_cookie(&mut self, cookie: &str) {
        self.cookie = Some(cookie.to_string());
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = self.client.get(format!("http://{}{}", self.addr, path));
        self.send(request).await
    }

    pub async fn post(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let request = self
            .client
            .post(format!("http://{}{}", self.addr, path))
            .form(fields);
        self.send(request).await
    }

    /// GET the redirect target of `response`.
    /// Send the same form `count` times at once with the current cookie, returning the status codes.
    pub async fn post_concurrently(&self, path: &str, fields: &[(&str, &str)], count: usize) -> Vec<u16> {
        let url = format!("http://{}{}", self.addr, path);
        let fields: Vec<(String, String)> = fields.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();

        let mut handles = Vec::with_capacity(count);
        for _ in 0..count {
            let mut request = self.client.post(url.clone()).form(&fields);
            if let Some(cookie) = &self.cookie {
                request = request.header(COOKIE, cookie.clone());
            }
            handles.push(tokio::spawn(async move { request.send().await.unwrap().status().as_u16() }));
        }

        let mut statuses = Vec::with_capacity(count);
        for handle in handles {
            statuses.push(handle.await.unwrap());
        }
        statuses
    }

    pub async fn follow(&mut self, response: &TestResponse) -> TestResponse {
        let location = response.location.clone().expect("response is not a redirect");
        self.get(&location).await
    }

    pub async fn login(&mut self, username: &str, password: &str) -> TestResponse {
        self.post("/login/", &[("username", username), ("password", password)])
            .await
    }

    /// Create `username` with [`PASSWORD`] and sign in as them.
    pub async fn signed_in_as(&mut self, username: &str) -> user::Model {
        let user = self.create_user(username).await;
        let response = self.login(username, PASSWORD).await;
        assert!(response.is_redirect_to("/"), "login failed: {:?}", response);
        user
    }

    async fn send(&mut self, mut request: reqwest::RequestBuilder) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie.clone());
        }
        let response = request.send().await.unwrap();

        let set_cookie = response
            .headers()
            .get(SET_COOKIE)
            .map(|value| value.to_str().unwrap().to_string());
        if let Some(value) = &set_cookie {
            let pair = value.split(';').next().unwrap().trim();
            self.cookie = Some(pair.to_string());
        }

        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(LOCATION)
            .map(|value| value.to_str().unwrap().to_string());
        let body = response.text().await.unwrap();

        TestResponse {
            status,
            location,
            set_cookie,
            body,
        }
    }

    pub async fn create_user(&self, username: &str) -> user::Model {
        UserRepository::create(
            &self.storage().conn,
            NewUser {
                username: username.to_string(),
                first_name: format!("{}-first", username),
                last_name: format!("{}-last", username),
                password_hash: hash_password(PASSWORD),
            },
        )
        .await
        .unwrap()
    }

    pub async fn create_status(&self, name: &str) -> status::Model {
        StatusRepository::create(&self.storage().conn, name).await.unwrap()
    }

    pub async fn create_label(&self, name: &str) -> label::Model {
        LabelRepository::create(&self.storage().conn, name).await.unwrap()
    }

    pub async fn create_task(
        &self,
        name: &str,
        author: &user::Model,
        executor: &user::Model,
        status: &status::Model,
        labels: &[&label::Model],
    ) -> task::Model {
        TaskRepository::create(
            &self.storage().conn,
            author.id,
            TaskChanges {
                name: name.to_string(),
                description: String::new(),
                status_id: status.id,
                executor_id: executor.id,
                label_ids: labels.iter().map(|label| label.id).collect(),
            },
        )
        .await
        .unwrap()
    }
}
