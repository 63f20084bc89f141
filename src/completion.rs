//! # Shell Completion Module
//!
//! Completion scripts come from `clap_complete`. Channel keys are completed
//! through the hidden `complete-channels` command, which prints one key per
//! line.
//!
//! ```bash
//! retrovision completion bash > ~/.local/share/bash-completion/completions/retrovision
//! retrovision completion zsh > ~/.config/zsh/completions/_retrovision
//! ```

use crate::catalog::CHANNELS;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io;

/// Generate shell completions for the given shell
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

/// Convert our Shell enum to clap_complete's Shell enum
pub fn shell_to_completion_shell(shell: &crate::cli::Shell) -> CompletionShell {
    match shell {
        crate::cli::Shell::Bash => CompletionShell::Bash,
        crate::cli::Shell::Zsh => CompletionShell::Zsh,
        crate::cli::Shell::Fish => CompletionShell::Fish,
        crate::cli::Shell::PowerShell => CompletionShell::PowerShell,
        crate::cli::Shell::Elvish => CompletionShell::Elvish,
    }
}

/// Channel keys offered for completion
pub fn channel_completions() -> Vec<&'static str> {
    CHANNELS.iter().map(|channel| channel.key).collect()
}

/// Print channel keys, one per line
pub fn print_channel_completions() {
    for key in channel_completions() {
        println!("{key}");
    }
}
