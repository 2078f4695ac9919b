pub mod cli_main;
pub mod commands;

pub use commands::{
    build_error, build_notification, build_request, build_response, parse_input, render, InputMode,
};
