//! Wire text to messages
//!
//! Parsing never fails from the caller's point of view. Text that is not
//! JSON becomes an error response carrying `PARSE_ERROR`; JSON that is not a
//! well-formed 2.0 message becomes one carrying `INVALID_REQUEST`. Ids found
//! in the input are taken as-is and never advance a local `IdGenerator`.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::protocol::{ErrorInfo, Id, Message, Role, INVALID_REQUEST, PARSE_ERROR, VERSION};

/// Outcome of parsing text that may hold a single message or a batch
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    Single(Message),
    Batch(Vec<Message>),
}

impl Parsed {
    /// Flatten into messages in input order
    pub fn into_messages(self) -> Vec<Message> {
        match self {
            Parsed::Single(msg) => vec![msg],
            Parsed::Batch(msgs) => msgs,
        }
    }
}

fn rejected(id: Id, info: &ErrorInfo) -> Message {
    Message::error_response(id, info.clone())
}

/// Parse one message from wire text
pub fn parse(input: &str) -> Message {
    match serde_json::from_str::<Value>(input) {
        Ok(value) => from_value(value),
        Err(e) => {
            debug!("Failed to decode message: {}", e);
            rejected(Id::Null, &PARSE_ERROR)
        }
    }
}

/// Parse each input independently. The output has one message per input,
/// in the same order; a bad element does not affect the others.
pub fn parse_batch<I, S>(inputs: I) -> Vec<Message>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let msgs: Vec<Message> = inputs.into_iter().map(|input| parse(input.as_ref())).collect();
    debug!("Parsed batch of {} messages", msgs.len());
    msgs
}

/// Parse wire text holding either one message or a JSON array of them
pub fn parse_str(input: &str) -> Parsed {
    match serde_json::from_str::<Value>(input) {
        Ok(Value::Array(elements)) => {
            if elements.is_empty() {
                debug!("Rejecting empty batch");
                return Parsed::Single(rejected(Id::Null, &INVALID_REQUEST));
            }
            Parsed::Batch(elements.into_iter().map(from_value).collect())
        }
        Ok(value) => Parsed::Single(from_value(value)),
        Err(e) => {
            debug!("Failed to decode input: {}", e);
            Parsed::Single(rejected(Id::Null, &PARSE_ERROR))
        }
    }
}

/// Build a message from an already decoded JSON value
pub fn from_value(value: Value) -> Message {
    let Value::Object(fields) = value else {
        debug!("Rejecting non-object message");
        return rejected(Id::Null, &INVALID_REQUEST);
    };

    if fields.get("jsonrpc").and_then(Value::as_str) != Some(VERSION) {
        debug!("Rejecting message without jsonrpc \"{}\"", VERSION);
        return rejected(Id::Null, &INVALID_REQUEST);
    }

    let msg = from_fields(fields);
    trace!("Decoded message: {:?}", msg);
    msg
}

fn from_fields(mut fields: Map<String, Value>) -> Message {
    let id = match fields.get("id") {
        None => None,
        Some(raw) => match Id::from_value(raw) {
            Some(id) => Some(id),
            None => {
                debug!("Rejecting message with invalid id {}", raw);
                return rejected(Id::Null, &INVALID_REQUEST);
            }
        },
    };

    // A rejected message keeps whatever id could be recovered
    let reject = |id: Option<Id>| rejected(id.unwrap_or(Id::Null), &INVALID_REQUEST);

    let result = fields.remove("result");
    let error = fields.remove("error");

    let role = match (result, error) {
        (Some(_), Some(_)) => {
            debug!("Rejecting message carrying both result and error");
            return reject(id);
        }
        (Some(result), None) => Role::Result(result),
        (None, Some(error)) => match ErrorInfo::try_from(error) {
            Ok(info) => Role::Error(info),
            Err(e) => {
                debug!("Rejecting message with malformed error member: {}", e);
                return reject(id);
            }
        },
        (None, None) => match fields.remove("method") {
            Some(Value::String(method)) => Role::Call {
                method,
                params: fields.remove("params"),
            },
            _ => {
                debug!("Rejecting call without a string method");
                return reject(id);
            }
        },
    };

    Message::from_parts(id, role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_notification() {
        let msg = parse(r#"{"jsonrpc":"2.0","method":"sum","params":[1,2]}"#);
        assert!(msg.is_notification());
        assert_eq!(msg.method(), Some("sum"));
        assert_eq!(msg.params(), Some(&json!([1, 2])));
        assert!(msg.id().is_none());
    }

    #[test]
    fn test_parse_request_keeps_decoded_id() {
        let msg = parse(r#"{"jsonrpc":"2.0","id":"abc","method":"ping"}"#);
        assert!(msg.is_request());
        assert_eq!(msg.id(), Some(&Id::from("abc")));
        assert_eq!(msg.params(), None);
    }

    #[test]
    fn test_parse_request_with_null_id() {
        let msg = parse(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#);
        assert!(msg.is_request());
        assert_eq!(msg.id(), Some(&Id::Null));
    }

    #[test]
    fn test_parse_not_json() {
        let msg = parse("not json");
        assert_eq!(msg.id(), Some(&Id::Null));
        let error = msg.error().unwrap();
        assert_eq!(error.code, -32700);
        assert_eq!(
            error.message(),
            Some("An error occurred on the server while parsing the JSON text.")
        );
    }

    #[test]
    fn test_parse_wrong_version() {
        for input in [
            r#"{"jsonrpc":"1.0","method":"ping","id":1}"#,
            r#"{"method":"ping","id":1}"#,
            r#"{"jsonrpc":2.0,"method":"ping"}"#,
            r#"[1,2,3]"#,
            r#""2.0""#,
        ] {
            let msg = parse(input);
            assert_eq!(msg.id(), Some(&Id::Null), "input: {}", input);
            assert_eq!(msg.error().map(|e| e.code), Some(-32600), "input: {}", input);
        }
    }

    #[test]
    fn test_parse_result_response() {
        let msg = parse(r#"{"jsonrpc":"2.0","id":3,"result":{"ok":true}}"#);
        assert_eq!(msg.id(), Some(&Id::Number(3)));
        assert_eq!(msg.result(), Some(&json!({"ok": true})));
        assert_eq!(msg.method(), None);
    }

    #[test]
    fn test_parse_result_overrides_call_fields() {
        let msg = parse(r#"{"jsonrpc":"2.0","id":3,"method":"sum","params":[1],"result":1}"#);
        assert_eq!(msg.method(), None);
        assert_eq!(msg.params(), None);
        assert_eq!(msg.result(), Some(&json!(1)));
    }

    #[test]
    fn test_parse_error_response() {
        let msg = parse(
            r#"{"jsonrpc":"2.0","id":5,"error":{"code":-32601,"message":"missing","data":[1]}}"#,
        );
        let error = msg.error().unwrap();
        assert_eq!(msg.id(), Some(&Id::Number(5)));
        assert_eq!(error.code, -32601);
        assert_eq!(error.message(), Some("missing"));
        assert_eq!(error.data, Some(json!([1])));
    }

    #[test]
    fn test_parse_error_response_keeps_code_when_message_is_not_text() {
        let msg = parse(r#"{"jsonrpc":"2.0","id":2,"error":{"code":-32000,"message":5}}"#);
        let error = msg.error().unwrap();
        assert_eq!(msg.id(), Some(&Id::Number(2)));
        assert_eq!(error.code, -32000);
        assert_eq!(error.message(), None);
        assert_eq!(
            crate::jsonrpc::serialize(&msg).unwrap(),
            r#"{"jsonrpc":"2.0","id":2,"error":{"code":-32000}}"#
        );
    }

    #[test]
    fn test_parse_id_outside_i64_is_invalid() {
        for input in [
            r#"{"jsonrpc":"2.0","id":18446744073709551615,"method":"ping"}"#,
            r#"{"jsonrpc":"2.0","id":1.0,"method":"ping"}"#,
        ] {
            let msg = parse(input);
            assert_eq!(msg.id(), Some(&Id::Null), "input: {}", input);
            assert_eq!(msg.error().map(|e| e.code), Some(-32600), "input: {}", input);
        }
    }

    #[test]
    fn test_parse_result_and_error_is_invalid() {
        let msg = parse(r#"{"jsonrpc":"2.0","id":5,"result":1,"error":{"code":1}}"#);
        assert_eq!(msg.id(), Some(&Id::Number(5)));
        assert_eq!(msg.error().map(|e| e.code), Some(-32600));
        assert!(msg.result().is_none());
    }

    #[test]
    fn test_parse_malformed_error_member_is_invalid() {
        let msg = parse(r#"{"jsonrpc":"2.0","id":5,"error":{"message":"no code"}}"#);
        assert_eq!(msg.error().map(|e| e.code), Some(-32600));
    }

    #[test]
    fn test_parse_missing_method_is_invalid() {
        let msg = parse(r#"{"jsonrpc":"2.0","id":8}"#);
        assert_eq!(msg.id(), Some(&Id::Number(8)));
        assert_eq!(msg.error().map(|e| e.code), Some(-32600));

        let msg = parse(r#"{"jsonrpc":"2.0","method":7}"#);
        assert_eq!(msg.id(), Some(&Id::Null));
        assert_eq!(msg.error().map(|e| e.code), Some(-32600));
    }

    #[test]
    fn test_parse_invalid_id_is_invalid() {
        let msg = parse(r#"{"jsonrpc":"2.0","id":{"x":1},"method":"ping"}"#);
        assert_eq!(msg.id(), Some(&Id::Null));
        assert_eq!(msg.error().map(|e| e.code), Some(-32600));
    }

    #[test]
    fn test_parse_batch_preserves_order() {
        let msgs = parse_batch([
            r#"{"jsonrpc":"2.0","id":1,"method":"a"}"#,
            "garbage",
            r#"{"jsonrpc":"2.0","method":"c"}"#,
        ]);
        assert_eq!(msgs.len(), 3);
        assert_eq!(msgs[0].method(), Some("a"));
        assert_eq!(msgs[1].error().map(|e| e.code), Some(-32700));
        assert_eq!(msgs[2].method(), Some("c"));
    }

    #[test]
    fn test_parse_batch_empty() {
        let msgs = parse_batch(Vec::<String>::new());
        assert!(msgs.is_empty());
    }

    #[test]
    fn test_parse_str_single_and_array() {
        let parsed = parse_str(r#"{"jsonrpc":"2.0","method":"a"}"#);
        assert!(matches!(parsed, Parsed::Single(ref m) if m.method() == Some("a")));

        let parsed = parse_str(r#"[{"jsonrpc":"2.0","method":"a"}, 1, {"jsonrpc":"2.0","id":2,"result":0}]"#);
        let msgs = parsed.into_messages();
        assert_eq!(msgs.len(), 3);
        assert_eq!(msgs[0].method(), Some("a"));
        assert_eq!(msgs[1].error().map(|e| e.code), Some(-32600));
        assert_eq!(msgs[2].result(), Some(&json!(0)));
    }

    #[test]
    fn test_parse_str_empty_array() {
        let msgs = parse_str("[]").into_messages();
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].error().map(|e| e.code), Some(-32600));
    }

    #[test]
    fn test_parse_str_not_json() {
        let msgs = parse_str("[{").into_messages();
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].error().map(|e| e.code), Some(-32700));
    }
}
