use serde_json::Value;
use std::fmt;

use super::{ErrorInfo, Id, IdGenerator, VERSION};

/// What a message currently is. Exactly one role is active at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum Role {
    /// A request or notification
    Call {
        method: String,
        params: Option<Value>,
    },
    /// A successful response
    Result(Value),
    /// A failed response
    Error(ErrorInfo),
}

/// A single JSON-RPC 2.0 message.
///
/// Requests carry an id; notifications never do. A call may later be turned
/// into a response with `set_result` or `set_error`, which drops the method
/// and params. There is no way back to the call role.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    id: Option<Id>,
    role: Role,
}

impl Message {
    /// Build a request whose id is drawn from the process-wide generator
    pub fn request(method: impl Into<String>, params: Option<Value>) -> Self {
        Self::request_with(IdGenerator::global(), method, params)
    }

    /// Build a request whose id is drawn from `ids`
    pub fn request_with(ids: &IdGenerator, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            id: Some(ids.next()),
            role: Role::Call {
                method: method.into(),
                params,
            },
        }
    }

    pub fn notification(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            id: None,
            role: Role::Call {
                method: method.into(),
                params,
            },
        }
    }

    pub fn response(id: Id, result: Value) -> Self {
        Self {
            id: Some(id),
            role: Role::Result(result),
        }
    }

    pub fn error_response(id: Id, error: ErrorInfo) -> Self {
        Self {
            id: Some(id),
            role: Role::Error(error),
        }
    }

    /// Assemble a message from already-decoded parts. Used by the parser so
    /// that received ids never touch a local generator.
    pub(crate) fn from_parts(id: Option<Id>, role: Role) -> Self {
        Self { id, role }
    }

    /// Switch to the result role, discarding method, params or error
    pub fn set_result(&mut self, result: Value) {
        self.role = Role::Result(result);
    }

    /// Switch to the error role, discarding method, params or result
    pub fn set_error(&mut self, error: ErrorInfo) {
        self.role = Role::Error(error);
    }

    pub fn version(&self) -> &'static str {
        VERSION
    }

    pub fn id(&self) -> Option<&Id> {
        self.id.as_ref()
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn method(&self) -> Option<&str> {
        match &self.role {
            Role::Call { method, .. } => Some(method),
            _ => None,
        }
    }

    pub fn params(&self) -> Option<&Value> {
        match &self.role {
            Role::Call { params, .. } => params.as_ref(),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.role {
            Role::Result(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match &self.role {
            Role::Error(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_call(&self) -> bool {
        matches!(self.role, Role::Call { .. })
    }

    /// A call without an id
    pub fn is_notification(&self) -> bool {
        self.is_call() && self.id.is_none()
    }

    pub fn is_request(&self) -> bool {
        self.is_call() && self.id.is_some()
    }

    pub fn is_response(&self) -> bool {
        !self.is_call()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = crate::jsonrpc::serialize(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
