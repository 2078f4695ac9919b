use thiserror::Error;

pub mod error_info;
pub mod id;
pub mod message;


pub use error_info::{
    ErrorInfo, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR,
};
pub use id::{Id, IdGenerator};
pub use message::{Message, Role};

/// The only protocol version this crate speaks
pub const VERSION: &str = "2.0";

/// Faults raised to the caller. Malformed wire input is never reported here;
/// the parser turns it into a Message in the error role instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
