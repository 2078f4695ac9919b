pub mod config;
pub mod jsonrpc;
pub mod logging;
pub mod protocol;

pub use config::Config;
pub use jsonrpc::{parse, parse_batch, parse_str, serialize, serialize_batch, serialize_pretty, Parsed};
pub use logging::{get_log_level, init_tracing};
pub use protocol::{
    Error, ErrorInfo, Id, IdGenerator, Message, Result, Role, INTERNAL_ERROR, INVALID_PARAMS,
    INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR, VERSION,
};
