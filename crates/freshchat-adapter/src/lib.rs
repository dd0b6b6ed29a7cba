/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Freshchat adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

//! Client for the Freshchat REST API (users, conversations, messages,
//! channels) and a verifier for signed Freshchat webhooks.

pub mod http;
pub mod types;
pub mod webhook;

// Re-export commonly used types from http
pub use http::{
    ApiError,
    ApiErrorKind,
    FreshchatClient,
    FreshchatConfig,
    FreshchatError,
    FreshchatResponse,
    ResponseBody,
    Result,
};

// Re-export all types
pub use types::*;

// Re-export commonly used types from webhook
pub use webhook::{
    EventAction,
    EventData,
    IncomingEvent,
    WebhookVerifier,
};
