use anyhow::Result;

// This function checks if stdin is redirected
fn stdin_has_data() -> bool {
    // If stdin is not a tty, it's likely redirected (pipe, file, etc.)
    !atty::is(atty::Stream::Stdin)
}

fn main() -> Result<()> {
    jsonrpc_cli::cli_main::main(stdin_has_data())
}
