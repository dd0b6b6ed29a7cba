/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::models::{Channel, Message};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total_items: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u64>,
    #[serde(default)]
    pub current_page: Option<u64>,
    #[serde(default)]
    pub items_per_page: Option<u64>,
}

/// Body of `GET /channels`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Channels {
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub links: Option<Value>,
}

impl Channels {
    pub const ENDPOINT: &'static str = "/channels";
}

/// Body of `GET /conversations/{id}/messages`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagesPage {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub link: Option<Value>,
}
