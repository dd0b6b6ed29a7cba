/*
[INPUT]:  Webhook public key, signature header and raw request body
[OUTPUT]: Verified and demultiplexed webhook events
[POS]:    Webhook layer - inbound notifications
[UPDATE]: When adding webhook event kinds or verification options
*/

pub mod events;
pub mod security;

pub use events::{
    EventAction, EventData, IncomingEvent, IncomingMessage, ReopenEvent, ResolveEvent,
};
pub use security::{WebhookVerifier, load_key, parse_public_key};
