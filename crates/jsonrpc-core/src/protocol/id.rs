use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

/// Correlation id of a request or response
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Number(i64),
    String(String),
    Null,
}

impl Id {
    /// Interpret a decoded `id` member. Only integers that fit in an i64 are
    /// numeric ids; floats (even `1.0`), booleans, arrays and objects are not
    /// valid ids.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Id::Null),
            Value::Number(n) => n.as_i64().map(Id::Number),
            Value::String(s) => Some(Id::String(s.clone())),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Id::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Number(n)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::String(s.to_string())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(n) => write!(f, "{}", n),
            Id::String(s) => write!(f, "{:?}", s),
            Id::Null => write!(f, "null"),
        }
    }
}

// Process-wide generator used by Message::request
static GLOBAL_GENERATOR: OnceLock<IdGenerator> = OnceLock::new();

/// Monotonic source of request ids. Safe to share between threads: each
/// call to `next` is a single fetch-and-increment.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    /// Zero-based generator
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// The generator shared by every request built with `Message::request`.
    /// It starts at zero and cannot be reset.
    pub fn global() -> &'static Self {
        GLOBAL_GENERATOR.get_or_init(Self::new)
    }

    /// Consume and return the next id
    pub fn next(&self) -> Id {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        // Wire ids are signed; saturate rather than wrap into negatives.
        Id::Number(i64::try_from(n).unwrap_or(i64::MAX))
    }

    /// The id the next call to `next` will hand out, without consuming it
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}
