use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use jsonrpc_core::{get_log_level, init_tracing, Config};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::debug;

use crate::commands::{
    build_error, build_notification, build_request, build_response, parse_input, render, InputMode,
};

#[derive(Parser)]
#[clap(author, version, about)]
pub struct Cli {
    /// Path to config file
    #[clap(long, short)]
    config: Option<PathBuf>,

    /// Pretty-print wire text
    #[clap(long)]
    pretty: bool,

    /// Enable debug logging
    #[clap(long)]
    verbose: bool,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a request with the next local id
    Request {
        method: String,
        /// Params as JSON
        #[clap(long)]
        params: Option<String>,
    },
    /// Build a notification
    Notify {
        method: String,
        /// Params as JSON
        #[clap(long)]
        params: Option<String>,
    },
    /// Build a success response
    Respond {
        #[clap(long)]
        id: String,
        /// Result as JSON
        #[clap(long)]
        result: String,
    },
    /// Build an error response
    Fail {
        #[clap(long)]
        id: String,
        #[clap(long, allow_hyphen_values = true)]
        code: i64,
        #[clap(long)]
        message: Option<String>,
        /// Error data as JSON
        #[clap(long)]
        data: Option<String>,
    },
    /// Parse wire text and print each message in canonical form
    Parse {
        /// Input file; stdin when omitted
        #[clap(value_name = "FILE")]
        input: Option<PathBuf>,
        /// Treat every line as a separate message
        #[clap(long)]
        lines: bool,
    },
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Entry point. `stdin_piped` lets a bare invocation parse piped input.
pub fn main(stdin_piped: bool) -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose && std::env::var("LOG_LEVEL").is_err() {
        std::env::set_var("LOG_LEVEL", "debug");
    }

    let config = match Config::load(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load configuration: {}", e);
            Config::default()
        }
    };

    let log_file = init_tracing(config.log_dir());
    debug!("Logging to {} at level {}", log_file.display(), get_log_level());
    debug!("Configuration: {:?}", config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &config, stdin_piped, &mut out)
}

/// Execute a parsed command line, writing one wire text per message to `out`
pub fn run<W: Write>(cli: Cli, config: &Config, stdin_piped: bool, out: &mut W) -> Result<()> {
    let pretty = cli.pretty || config.output.pretty;

    let command = match cli.command {
        Some(command) => command,
        None if stdin_piped => Command::Parse {
            input: None,
            lines: false,
        },
        None => bail!("No command given and nothing piped on stdin (see --help)"),
    };

    let msgs = match command {
        Command::Request { method, params } => {
            let ids = config.id_generator();
            vec![build_request(&ids, &method, params.as_deref())?]
        }
        Command::Notify { method, params } => vec![build_notification(&method, params.as_deref())?],
        Command::Respond { id, result } => vec![build_response(&id, &result)?],
        Command::Fail {
            id,
            code,
            message,
            data,
        } => vec![build_error(&id, code, message.as_deref(), data.as_deref())?],
        Command::Parse { input, lines } => {
            let text = read_input(input.as_ref())?;
            let mode = if lines {
                InputMode::Lines
            } else {
                InputMode::Document
            };
            parse_input(&text, mode)
        }
    };

    for line in render(&msgs, pretty)? {
        writeln!(out, "{}", line)?;
    }

    debug!("Wrote {} messages", msgs.len());
    Ok(())
}
