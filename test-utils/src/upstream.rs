//! Mock CloudNet REST API for exercising the panel's upstream client.
//!
//! Wraps an `httpmock::MockServer` with helpers for the endpoints the panel
//! talks to. Tests needing unusual behavior (sequenced responses, header
//! matching) can register mocks directly on the public `server` field.

use httpmock::{Method, Mock, MockServer};
use serde_json::{json, Value};

use crate::factory::token::token_pair;

pub struct MockCloudNet {
    pub server: MockServer,
}

impl MockCloudNet {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start_async().await,
        }
    }

    /// Base URL to hand to the client under test.
    pub fn base_url(&self) -> String {
        self.server.base_url()
    }

    /// `POST /auth` answering with a fresh token pair (1h lifetime).
    pub fn mock_auth_ok(&self, access_token: &str, refresh_token: &str) -> Mock<'_> {
        self.server.mock(|when, then| {
            when.method(Method::POST).path("/auth");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(token_pair(access_token, refresh_token, 3600));
        })
    }

    /// `POST /auth` rejecting the configured credentials.
    pub fn mock_auth_failure(&self) -> Mock<'_> {
        self.server.mock(|when, then| {
            when.method(Method::POST).path("/auth");
            then.status(401);
        })
    }

    /// `POST /auth/refresh` answering with a fresh token pair.
    pub fn mock_refresh_ok(&self, access_token: &str, refresh_token: &str) -> Mock<'_> {
        self.server.mock(|when, then| {
            when.method(Method::POST).path("/auth/refresh");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(token_pair(access_token, refresh_token, 3600));
        })
    }

    /// `POST /auth/refresh` failing outright.
    pub fn mock_refresh_failure(&self) -> Mock<'_> {
        self.server.mock(|when, then| {
            when.method(Method::POST).path("/auth/refresh");
            then.status(401);
        })
    }

    /// `GET /ping` reachable.
    pub fn mock_ping_ok(&self) -> Mock<'_> {
        self.server.mock(|when, then| {
            when.method(Method::GET).path("/ping");
            then.status(204);
        })
    }

    /// `GET /ping` failing with a server error.
    pub fn mock_ping_failure(&self) -> Mock<'_> {
        self.server.mock(|when, then| {
            when.method(Method::GET).path("/ping");
            then.status(500);
        })
    }

    /// `GET /service` answering the wrapped service list.
    pub fn mock_services(&self, services: Vec<Value>) -> Mock<'_> {
        self.server.mock(|when, then| {
            when.method(Method::GET).path("/service");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "services": services }));
        })
    }

    /// `GET /service` requiring a specific bearer token.
    pub fn mock_services_for_token(&self, token: &str, services: Vec<Value>) -> Mock<'_> {
        let authorization = format!("Bearer {}", token);
        self.server.mock(move |when, then| {
            when.method(Method::GET)
                .path("/service")
                .header("authorization", authorization.as_str());
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "services": services }));
        })
    }

    /// `GET /service` rejecting a specific bearer token with 401.
    pub fn mock_services_unauthorized_for(&self, token: &str) -> Mock<'_> {
        let authorization = format!("Bearer {}", token);
        self.server.mock(move |when, then| {
            when.method(Method::GET)
                .path("/service")
                .header("authorization", authorization.as_str());
            then.status(401);
        })
    }

    /// `GET /service` failing with a server error.
    pub fn mock_services_failure(&self, status: u16) -> Mock<'_> {
        self.server.mock(move |when, then| {
            when.method(Method::GET).path("/service");
            then.status(status);
        })
    }

    /// `GET /cluster` answering the wrapped node list.
    pub fn mock_nodes(&self, nodes: Vec<Value>) -> Mock<'_> {
        self.server.mock(|when, then| {
            when.method(Method::GET).path("/cluster");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "nodes": nodes }));
        })
    }

    /// `PATCH /service/{id}/lifecycle` accepting any target.
    pub fn mock_lifecycle(&self, id: &str) -> Mock<'_> {
        let path = format!("/service/{}/lifecycle", id);
        self.server.mock(move |when, then| {
            when.method(Method::PATCH).path(path.as_str());
            then.status(204);
        })
    }
}
