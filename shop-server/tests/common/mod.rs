//! Shared helpers for router-level tests
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use shared::models::{Role, StaffCreate, StaffUpdate, StaffUser};
use shared::util::snowflake_id;
use tower::ServiceExt;

use shop_server::auth::JwtConfig;
use shop_server::db::Storage;
use shop_server::db::repository::StaffRepository;
use shop_server::{Config, ServerState, build_app};

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-chars";
pub const TEST_PASSWORD: &str = "correct-horse-battery";

pub struct TestApp {
    pub state: ServerState,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// App whose config is tweaked before the state is built
    pub fn with_config(tweak: impl FnOnce(&mut Config)) -> Self {
        let mut config = Config::with_overrides(
            std::env::temp_dir(),
            0,
            JwtConfig::with_secret(TEST_SECRET),
        );
        tweak(&mut config);
        let storage = Storage::open_in_memory().unwrap();
        let state = ServerState::new(config, storage);
        let router = build_app(&state).with_state(state.clone());
        Self { state, router }
    }

    /// Create a staff user holding `role`
    pub fn staff(&self, role: Role) -> StaffUser {
        StaffRepository::new(self.state.storage.clone())
            .create(StaffCreate {
                name: format!("{} user", role.display_name()),
                email: format!("{}-{}@spoke.test", role.as_str(), snowflake_id()),
                password: TEST_PASSWORD.to_string(),
                role,
            })
            .unwrap()
    }

    /// Deactivate `user` on behalf of a fresh admin
    pub fn deactivate(&self, user: &StaffUser) {
        let admin = self.staff(Role::Admin);
        StaffRepository::new(self.state.storage.clone())
            .update(
                user.id,
                StaffUpdate {
                    name: None,
                    email: None,
                    password: None,
                    role: None,
                    is_active: Some(false),
                },
                admin.id,
            )
            .unwrap();
    }

    pub fn token(&self, user: &StaffUser) -> String {
        self.state.jwt_service.generate_token(user).unwrap()
    }

    /// Token for a fresh user of `role`
    pub fn token_for(&self, role: Role) -> String {
        let user = self.staff(role);
        self.token(&user)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send("GET", uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send("PUT", uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send("DELETE", uri, token, None).await
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }
}

/// Error code from an `ApiResponse` error body
pub fn error_code(body: &Value) -> u64 {
    body["code"].as_u64().unwrap_or_default()
}
