//! JSON-RPC wire codec

pub mod parser;
pub mod serializer;

pub use parser::{from_value, parse, parse_batch, parse_str, Parsed};
pub use serializer::{serialize, serialize_batch, serialize_pretty};
