use anyhow::{anyhow, Context, Result};
use jsonrpc_core::{
    parse_batch, parse_str, serialize, serialize_pretty, ErrorInfo, Id, IdGenerator, Message,
};
use serde_json::Value;
use tracing::debug;

/// How input text is split into messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// The whole input is one message or one JSON array batch
    Document,
    /// Every non-blank line is a separate message
    Lines,
}

fn parse_json_arg(name: &str, text: &str) -> Result<Value> {
    serde_json::from_str(text).with_context(|| format!("--{} is not valid JSON: {}", name, text))
}

fn parse_optional_json_arg(name: &str, text: Option<&str>) -> Result<Option<Value>> {
    text.map(|t| parse_json_arg(name, t)).transpose()
}

/// Accept a JSON number, string or null as an id; anything else is taken as
/// a bare string id.
fn parse_id_arg(text: &str) -> Result<Id> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => Id::from_value(&value)
            .ok_or_else(|| anyhow!("--id must be an integer, a string or null: {}", text)),
        Err(_) => Ok(Id::String(text.to_string())),
    }
}

pub fn build_request(ids: &IdGenerator, method: &str, params: Option<&str>) -> Result<Message> {
    let params = parse_optional_json_arg("params", params)?;
    Ok(Message::request_with(ids, method, params))
}

pub fn build_notification(method: &str, params: Option<&str>) -> Result<Message> {
    let params = parse_optional_json_arg("params", params)?;
    Ok(Message::notification(method, params))
}

pub fn build_response(id: &str, result: &str) -> Result<Message> {
    Ok(Message::response(parse_id_arg(id)?, parse_json_arg("result", result)?))
}

pub fn build_error(
    id: &str,
    code: i64,
    message: Option<&str>,
    data: Option<&str>,
) -> Result<Message> {
    let mut info = ErrorInfo::new(code);
    if let Some(message) = message {
        info = info.with_message(message);
    }
    if let Some(data) = parse_optional_json_arg("data", data)? {
        info = info.with_data(data);
    }
    Ok(Message::error_response(parse_id_arg(id)?, info))
}

pub fn parse_input(input: &str, mode: InputMode) -> Vec<Message> {
    let msgs = match mode {
        InputMode::Document => parse_str(input.trim()).into_messages(),
        InputMode::Lines => parse_batch(input.lines().filter(|line| !line.trim().is_empty())),
    };
    debug!("Parsed {} messages from input", msgs.len());
    msgs
}

/// Wire text for each message, one entry per message
pub fn render(msgs: &[Message], pretty: bool) -> Result<Vec<String>> {
    msgs.iter()
        .map(|msg| {
            let text = if pretty {
                serialize_pretty(msg)
            } else {
                serialize(msg)
            };
            text.context("Failed to encode message")
        })
        .collect()
}
