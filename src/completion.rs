//! # Shell Completion Module
//!
//! Generates completion scripts through clap_complete and serves the hidden
//! `complete-genres` command that lists genres already in the directory.
//!
//! ## Usage
//!
//! ```bash
//! # Generate bash completions
//! melomane completion bash > ~/.local/share/bash-completion/completions/melomane
//!
//! # Generate zsh completions
//! melomane completion zsh > ~/.config/zsh/completions/_melomane
//! ```

use crate::cli::Shell;
use crate::directory::Directory;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io;

/// Generate shell completions for the given shell
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

/// Convert our Shell enum to clap_complete's Shell enum
#[must_use]
pub const fn shell_to_completion_shell(shell: Shell) -> CompletionShell {
    match shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    }
}

/// Genre names to offer for `--genre`, sorted and without duplicates.
#[must_use]
pub fn genre_completions(directory: &Directory) -> Vec<String> {
    let mut genres: Vec<String> = directory.genres().into_iter().map(str::to_string).collect();
    genres.sort_by_key(|g| g.to_lowercase());
    genres
}

/// Print one genre per line for completion scripts
pub fn print_genre_completions(directory: &Directory) {
    for genre in genre_completions(directory) {
        println!("{genre}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::NewEntry;
    use tempfile::TempDir;

    #[test]
    fn test_shell_mapping() {
        assert_eq!(shell_to_completion_shell(Shell::Bash), CompletionShell::Bash);
        assert_eq!(shell_to_completion_shell(Shell::PowerShell), CompletionShell::PowerShell);
    }

    #[test]
    fn test_genre_completions_sorted_unique() {
        let dir = TempDir::new().unwrap();
        let mut directory = Directory::open(dir.path().join("data.json"));
        for (artist, genre) in [("A", "rock"), ("B", "Jazz"), ("C", "rock"), ("D", "Ambient")] {
            directory.add(NewEntry::new(artist, "LP", genre, 2000)).unwrap();
        }
        assert_eq!(genre_completions(&directory), vec!["Ambient", "Jazz", "rock"]);
    }
}
