/*
[INPUT]:  Raw webhook request bodies
[OUTPUT]: IncomingEvent with the data payload demultiplexed by key
[POS]:    Webhook layer - inbound event parsing
[UPDATE]: When adding webhook event kinds or payload fields
*/

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::http::Result;
use crate::types::{Actor, ActorType, Conversation, Message};

/// Webhook action names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    MessageCreate,
    ConversationAssignment,
    ConversationResolution,
    ConversationReopen,
    #[serde(other)]
    Other,
}

/// Webhook envelope `{actor, action, action_time, data}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomingEvent {
    #[serde(default)]
    pub actor: Actor,
    pub action: EventAction,
    #[serde(default)]
    pub action_time: Option<DateTime<Utc>>,
    pub data: EventData,
}

impl IncomingEvent {
    pub fn from_slice(raw_body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(raw_body)?)
    }

    /// Id of the conversation the event belongs to
    pub fn conversation_id(&self) -> Option<&str> {
        match &self.data {
            EventData::Message(message) => message.message.conversation_id.as_deref(),
            EventData::Resolve(resolve) => resolve.conversation.conversation_id.as_deref(),
            EventData::Reopen(reopen) => reopen.conversation.conversation_id.as_deref(),
            EventData::Other(_) => None,
        }
    }
}

/// Event payload, selected by which key the `data` object carries
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventData {
    Message(IncomingMessage),
    Resolve(ResolveEvent),
    Reopen(ReopenEvent),
    /// Payload kinds this crate does not model, kept as received
    #[serde(untagged)]
    Other(Value),
}

impl<'de> Deserialize<'de> for EventData {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut data = Map::<String, Value>::deserialize(deserializer)?;

        if let Some(payload) = data.remove("message") {
            return IncomingMessage::deserialize(payload)
                .map(EventData::Message)
                .map_err(de::Error::custom);
        }
        if let Some(payload) = data.remove("resolve") {
            return ResolveEvent::deserialize(payload)
                .map(EventData::Resolve)
                .map_err(de::Error::custom);
        }
        if let Some(payload) = data.remove("reopen") {
            return ReopenEvent::deserialize(payload)
                .map(EventData::Reopen)
                .map_err(de::Error::custom);
        }
        Ok(EventData::Other(Value::Object(data)))
    }
}

/// A newly created message; conversation fields arrive flat on the message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncomingMessage {
    pub message: Message,
}

impl IncomingMessage {
    /// The owning conversation rebuilt from the message's flat ids
    pub fn conversation(&self) -> Conversation {
        Conversation {
            conversation_id: self.message.conversation_id.clone(),
            channel_id: self.message.channel_id.clone(),
            app_id: self.message.app_id.clone(),
            ..Conversation::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolveEvent {
    #[serde(default)]
    pub resolver: Option<ActorType>,
    #[serde(default)]
    pub resolver_id: Option<String>,
    #[serde(default)]
    pub conversation: Conversation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReopenEvent {
    #[serde(default)]
    pub reopener: Option<ActorType>,
    #[serde(default)]
    pub reopener_id: Option<String>,
    #[serde(default)]
    pub conversation: Conversation,
}
