//! Message to wire text

use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use crate::protocol::{ErrorInfo, Id, Message, Result, Role, VERSION};

/// Wire shape of a message. Field order here is the emission order.
#[derive(Serialize)]
struct Envelope<'a> {
    jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a ErrorInfo>,
}

impl<'a> From<&'a Message> for Envelope<'a> {
    fn from(msg: &'a Message) -> Self {
        let mut envelope = Envelope {
            jsonrpc: VERSION,
            id: msg.id(),
            method: None,
            params: None,
            result: None,
            error: None,
        };

        match msg.role() {
            Role::Call { method, params } => {
                envelope.method = Some(method.as_str());
                // Absent params are omitted rather than written as null
                envelope.params = params.as_ref();
            }
            Role::Result(result) => envelope.result = Some(result),
            Role::Error(error) => envelope.error = Some(error),
        }

        envelope
    }
}

impl Serialize for Message {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Envelope::from(self).serialize(serializer)
    }
}

/// Encode a message as compact wire text
pub fn serialize(msg: &Message) -> Result<String> {
    let text = serde_json::to_string(msg)?;
    trace!("Serialized message: {}", text);
    Ok(text)
}

/// Encode a message as indented wire text
pub fn serialize_pretty(msg: &Message) -> Result<String> {
    Ok(serde_json::to_string_pretty(msg)?)
}

/// Encode messages as a wire-level batch (a JSON array)
pub fn serialize_batch(msgs: &[Message]) -> Result<String> {
    let text = serde_json::to_string(msgs)?;
    trace!("Serialized batch of {} messages", msgs.len());
    Ok(text)
}
