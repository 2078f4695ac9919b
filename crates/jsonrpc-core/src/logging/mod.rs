// Tracing-based logging setup for binaries built on this crate
pub mod tracing;
pub use self::tracing::*;
