//! Shell completion generation.

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::{self, Write};

use crate::cli::args::Cli;

/// Write the completion script for `shell` to `out`.
pub fn write_to(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, out);
}

/// Print completion script for the requested shell to stdout.
pub fn print(shell: Shell) {
    write_to(shell, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zsh_script_lists_subcommands() {
        let mut out = Vec::new();
        write_to(Shell::Zsh, &mut out);

        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("recap"));
        assert!(script.contains("serve"));
        assert!(script.contains("summarize"));
    }
}
