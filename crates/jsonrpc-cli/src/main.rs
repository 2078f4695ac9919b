use anyhow::Result;

// If stdin is not a tty, it's likely redirected (pipe, file, etc.)
fn stdin_has_data() -> bool {
    !atty::is(atty::Stream::Stdin)
}

fn main() -> Result<()> {
    jsonrpc_cli::cli_main::main(stdin_has_data())
}
