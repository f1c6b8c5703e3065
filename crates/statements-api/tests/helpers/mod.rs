//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p statements-api`.

#![allow(dead_code)]

pub mod fixtures;
pub mod workflows;

use axum_test::TestServer;
use statements_api::setup::{routes, services};
use statements_api::state::AppState;
use statements_core::{Config, StatementsConfig};
use std::collections::HashMap;
use std::sync::Arc;

/// Test application: server plus the state it serves, for direct store access.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Setup a test app with the default configuration.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(&[])
}

/// Setup a test app with configuration overrides, given as environment-style pairs.
pub fn setup_test_app_with(vars: &[(&str, &str)]) -> TestApp {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let statements_config = StatementsConfig::from_lookup(|key| vars.get(key).cloned())
        .expect("test configuration should be valid");
    let config = Config::new(statements_config);

    let state = services::initialize_state(&config);
    let router = routes::setup_routes(&config, state.clone()).expect("routes should build");
    let server = TestServer::new(router).expect("test server should start");

    TestApp { server, state }
}
