//! # Shell Completion Module
//!
//! - Completion scripts for the supported shells (through `clap_complete`)
//! - An enhanced bash script that completes song titles from the catalog
//! - The title listing that script calls back into
//!
//! ## Usage
//!
//! ```bash
//! syncup completion zsh > ~/.config/zsh/completions/_syncup
//! syncup completion-enhanced bash > ~/.local/share/bash-completion/completions/syncup
//! ```

use crate::catalog::Catalog;
use crate::cli::Shell;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io::{self, Write};

/// Generate shell completions for the given shell
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

/// Convert our Shell enum to clap_complete's Shell enum
#[must_use]
pub fn shell_to_completion_shell(shell: Shell) -> CompletionShell {
    match shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    }
}

/// Titles offered for completion.
///
/// With a prefix this is the autocomplete index (titles, artists and genres
/// all lead to titles); without one, every title in catalog order, deduplicated.
#[must_use]
pub fn title_completions(catalog: &Catalog, prefix: Option<&str>) -> Vec<String> {
    match prefix.filter(|p| !p.is_empty()) {
        Some(prefix) => catalog.autocomplete(prefix),
        None => {
            let mut titles: Vec<String> = Vec::with_capacity(catalog.len());
            for song in catalog.all() {
                if !titles.contains(&song.title) {
                    titles.push(song.title);
                }
            }
            titles
        }
    }
}

/// Print one completion candidate per line.
pub fn print_title_completions(catalog: &Catalog, prefix: Option<&str>) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for title in title_completions(catalog, prefix) {
        writeln!(out, "{title}")?;
    }
    Ok(())
}

/// Generate enhanced bash completion script with song title completion
pub fn generate_enhanced_bash_completion() {
    println!(r#"#!/bin/bash
# Enhanced SyncUp completion script with song title completion
# Install with: syncup completion-enhanced bash > ~/.local/share/bash-completion/completions/syncup

_syncup() {{
    local cur prev words cword
    _init_completion || return

    case "${{prev}}" in
        find|remove|similar)
            # Titles whose title, artist or genre starts with the current word
            local IFS=$'\n'
            COMPREPLY=($(syncup complete-titles "${{cur}}" 2>/dev/null))
            return 0
            ;;
        completion|completion-enhanced)
            COMPREPLY=($(compgen -W "bash zsh fish power-shell elvish" -- "${{cur}}"))
            return 0
            ;;
        --catalog)
            _filedir csv
            return 0
            ;;
    esac

    local subcommands="list add remove find complete similar fuzzy reindex completion completion-enhanced help"

    if [[ $cword -eq 1 ]]; then
        COMPREPLY=($(compgen -W "$subcommands --catalog --json --help --version" -- "${{cur}}"))
    else
        case "${{words[1]}}" in
            add)
                COMPREPLY=($(compgen -W "--year --duration --help" -- "${{cur}}"))
                ;;
            similar)
                COMPREPLY=($(compgen -W "--limit -l --json --help" -- "${{cur}}"))
                ;;
            fuzzy)
                COMPREPLY=($(compgen -W "--distance -d --json --help" -- "${{cur}}"))
                ;;
            *)
                COMPREPLY=($(compgen -W "--json --catalog --help" -- "${{cur}}"))
                ;;
        esac
    fi
}} &&
complete -F _syncup syncup

# ex: filetype=sh
"#);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song::Song;
    use tempfile::TempDir;

    #[test]
    fn test_shell_conversion() {
        assert_eq!(shell_to_completion_shell(Shell::Bash), CompletionShell::Bash);
        assert_eq!(shell_to_completion_shell(Shell::Zsh), CompletionShell::Zsh);
    }

    #[test]
    fn test_title_completions() {
        let dir = TempDir::new().expect("temp dir");
        let mut catalog = Catalog::open(dir.path().join("canciones.csv"));
        catalog.add(Song::new("Shape of You", "Other Artist", "Pop"));

        let all = title_completions(&catalog, None);
        assert_eq!(all.len(), 5, "duplicate titles listed once");
        assert_eq!(all[0], "Shape of You");

        assert_eq!(title_completions(&catalog, Some("nirv")), vec!["Smells Like Teen Spirit"]);
        assert_eq!(title_completions(&catalog, Some("")).len(), 5);
    }
}
