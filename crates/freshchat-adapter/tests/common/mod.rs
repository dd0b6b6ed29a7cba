/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for freshchat-adapter tests

#![allow(dead_code)]

use freshchat_adapter::{FreshchatClient, FreshchatConfig};
use wiremock::MockServer;

pub const APP_ID: &str = "3f2a6d4e-app";
pub const CHANNEL_ID: &str = "b7c1e9a0-channel";
pub const TOKEN: &str = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9.test.signature";

pub const PUBLIC_KEY: &str = include_str!("../fixtures/webhook_public_key.pem");
pub const RSA_PUBLIC_KEY: &str = include_str!("../fixtures/webhook_rsa_public_key.pem");
pub const SIGNED_PAYLOAD: &[u8] = include_bytes!("../fixtures/webhook_payload.json");
pub const PAYLOAD_SIGNATURE: &str = include_str!("../fixtures/webhook_payload.sig");

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Configuration pointing at the mock server
pub fn test_config(server: &MockServer) -> FreshchatConfig {
    FreshchatConfig::new(APP_ID, TOKEN)
        .with_base_url(server.uri())
        .with_default_channel_id(CHANNEL_ID)
}

pub fn test_client(server: &MockServer) -> FreshchatClient {
    FreshchatClient::new(test_config(server)).expect("client init")
}

pub fn bearer() -> String {
    format!("Bearer {TOKEN}")
}
