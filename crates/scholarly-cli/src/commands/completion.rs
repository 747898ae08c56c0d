use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use std::io::{self, Write};

pub fn execute(shell: Shell, cmd: &mut Command) -> Result<()> {
    write_completions(shell, cmd, &mut io::stdout())?;
    Ok(())
}

/// Render the completion script for `shell` into `out`
pub fn write_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) -> io::Result<()> {
    let bin_name = cmd.get_name().to_string();
    generate(shell, cmd, bin_name, out);
    out.flush()
}
