use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use tracing::warn;

use super::Error;

/// Lower bound of the code range reserved for protocol-defined errors
pub const RESERVED_MIN: i64 = -32768;
/// Upper bound of the code range reserved for protocol-defined errors
pub const RESERVED_MAX: i64 = -32000;

/// Error payload carried by a response in the error role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Cow<'static, str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Invalid JSON was received.
pub static PARSE_ERROR: ErrorInfo = ErrorInfo::standard(
    -32700,
    "An error occurred on the server while parsing the JSON text.",
);
/// The JSON sent is not a valid request object.
pub static INVALID_REQUEST: ErrorInfo =
    ErrorInfo::standard(-32600, "The JSON sent is not a valid Request object.");
/// The method does not exist or is not available.
pub static METHOD_NOT_FOUND: ErrorInfo =
    ErrorInfo::standard(-32601, "The method does not exist / is not available.");
/// Invalid method parameters.
pub static INVALID_PARAMS: ErrorInfo = ErrorInfo::standard(-32602, "Invalid method parameter(s).");
/// Internal JSON-RPC error.
pub static INTERNAL_ERROR: ErrorInfo = ErrorInfo::standard(-32603, "Internal JSON-RPC error.");

impl ErrorInfo {
    const fn standard(code: i64, message: &'static str) -> Self {
        Self {
            code,
            message: Some(Cow::Borrowed(message)),
            data: None,
        }
    }

    /// Create an error with only a code. Codes outside the reserved range
    /// are accepted as-is.
    pub fn new(code: i64) -> Self {
        Self {
            code,
            message: None,
            data: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(Cow::Owned(message.into()));
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Whether the code falls in the range reserved for the protocol itself
    pub fn is_reserved(&self) -> bool {
        (RESERVED_MIN..=RESERVED_MAX).contains(&self.code)
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => write!(f, "{} ({})", message, self.code),
            None => write!(f, "error {}", self.code),
        }
    }
}

/// Rebuild an ErrorInfo from the `error` member of a decoded message.
/// `code` must be an integer. A `message` that is not a string is dropped
/// and the rest of the error kept.
impl TryFrom<Value> for ErrorInfo {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut fields) = value else {
            return Err(Error::InvalidArgument(
                "error member must be an object".to_string(),
            ));
        };

        let code = fields
            .get("code")
            .and_then(Value::as_i64)
            .ok_or_else(|| Error::InvalidArgument("error code must be an integer".to_string()))?;

        let message = match fields.remove("message") {
            None | Some(Value::Null) => None,
            Some(Value::String(message)) => Some(Cow::Owned(message)),
            Some(other) => {
                warn!("Dropping non-string error message {}", other);
                None
            }
        };

        Ok(Self {
            code,
            message,
            data: fields.remove("data"),
        })
    }
}
