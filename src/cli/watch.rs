//! `dmon watch` subcommands implementation

use anyhow::{bail, Result};
use clap::Subcommand;
use std::path::Path;
use std::process::Command;

use crate::monitor::Monitor;

#[derive(Subcommand)]
pub enum WatchCommands {
    /// Print the watchlist
    Show,

    /// Print the watchlist file location
    Path,

    /// Replace the whole watchlist
    Set {
        /// New watchlist text
        text: String,
    },

    /// Append a container ID or name
    Add {
        /// Container ID or name
        entry: String,
    },

    /// Empty the watchlist
    Clear,

    /// Open the watchlist in $EDITOR
    Edit,
}

pub fn run(monitor: &mut Monitor, command: WatchCommands) -> Result<()> {
    match command {
        WatchCommands::Show => show(monitor),
        WatchCommands::Path => {
            println!("{}", monitor.watchlist().path().display());
            Ok(())
        }
        WatchCommands::Set { text } => {
            monitor.save_watchlist(&text)?;
            println!("✓ Watchlist saved");
            Ok(())
        }
        WatchCommands::Add { entry } => {
            if monitor.watchlist_mut().add(&entry)? {
                println!("✓ Watching: {}", entry.trim());
            } else {
                println!("Already watched: {}", entry.trim());
            }
            Ok(())
        }
        WatchCommands::Clear => {
            monitor.save_watchlist("")?;
            println!("✓ Watchlist cleared");
            Ok(())
        }
        WatchCommands::Edit => edit(monitor),
    }
}

fn show(monitor: &Monitor) -> Result<()> {
    let watchlist = monitor.watchlist();
    match watchlist.text() {
        None => {
            println!("No watchlist configured.");
            println!("Expected at: {}", watchlist.path().display());
        }
        Some(text) => {
            print!("{}", text);
            if !text.is_empty() && !text.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

/// Build the editor invocation. `$VISUAL`/`$EDITOR` may carry flags, e.g.
/// `code --wait`, so the program is the first word and the rest are args.
fn editor_command(editor: &str, path: &Path) -> Option<Command> {
    let mut words = editor.split_whitespace();
    let mut command = Command::new(words.next()?);
    command.args(words).arg(path);
    Some(command)
}

fn edit(monitor: &mut Monitor) -> Result<()> {
    let editor = std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .ok()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| "vi".to_string());

    // Make sure the file exists so the editor opens it rather than a scratch buffer
    if monitor.watchlist().text().is_none() {
        monitor.save_watchlist("")?;
    }

    let path = monitor.watchlist().path().to_path_buf();
    let Some(mut command) = editor_command(&editor, &path) else {
        bail!("No editor configured");
    };
    let status = command.status()?;
    if !status.success() {
        bail!("{} exited with {}", editor, status);
    }

    monitor.watchlist_mut().load();
    println!("✓ Watching {} entries", monitor.watchlist().entries().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(command: &Command) -> (String, Vec<String>) {
        (
            command.get_program().to_string_lossy().into_owned(),
            command
                .get_args()
                .map(|a| a.to_string_lossy().into_owned())
                .collect(),
        )
    }

    #[test]
    fn test_editor_with_flags_is_split() {
        let command = editor_command("code --wait", Path::new("/tmp/watch.cfg")).unwrap();
        assert_eq!(
            parts(&command),
            ("code".to_string(), vec!["--wait".to_string(), "/tmp/watch.cfg".to_string()])
        );
    }

    #[test]
    fn test_plain_editor() {
        let command = editor_command("vim", Path::new("/tmp/watch.cfg")).unwrap();
        assert_eq!(
            parts(&command),
            ("vim".to_string(), vec!["/tmp/watch.cfg".to_string()])
        );
    }

    #[test]
    fn test_blank_editor_is_rejected() {
        assert!(editor_command("   ", Path::new("/tmp/watch.cfg")).is_none());
    }
}
