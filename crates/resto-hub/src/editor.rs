use std::env;
use std::io;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// `$VISUAL`, then `$EDITOR`, then `vi`.
pub fn resolve_editor_command() -> String {
    env::var("VISUAL")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| env::var("EDITOR").ok().filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| "vi".to_owned())
}

/// Hand the terminal to the user's editor for `path`, then take it back.
pub fn edit_file(terminal: &mut Term, path: &Path) -> Result<()> {
    let command = resolve_editor_command();
    info!(editor = %command, path = %path.display(), "opening editor");
    let _guard = TerminalSuspendGuard::new(terminal).context("Failed to suspend the terminal")?;
    launch_editor_command(&command, path)
}

fn launch_editor_command(command: &str, path: &Path) -> Result<()> {
    let path_text = path.to_string_lossy();
    if path_text.starts_with('-') {
        bail!("Refusing to open {path_text} in the editor");
    }

    let status = Command::new("sh")
        .arg("-c")
        .arg(format!("{command} {}", shell_single_quote(path_text.as_ref())))
        .status()
        .with_context(|| format!("Failed to run editor command `{command}`"))?;
    if !status.success() {
        bail!("Editor exited with {status}");
    }
    Ok(())
}

fn shell_single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

/// Leaves raw mode and the alternate screen; restores both on drop.
struct TerminalSuspendGuard<'a> {
    terminal: &'a mut Term,
}

impl<'a> TerminalSuspendGuard<'a> {
    fn new(terminal: &'a mut Term) -> io::Result<Self> {
        terminal.show_cursor()?;
        disable_raw_mode()?;

        if let Err(err) = execute!(terminal.backend_mut(), LeaveAlternateScreen) {
            let _ = enable_raw_mode();
            let _ = execute!(terminal.backend_mut(), EnterAlternateScreen);
            let _ = terminal.hide_cursor();
            return Err(err);
        }
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSuspendGuard<'_> {
    fn drop(&mut self) {
        let _ = enable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), EnterAlternateScreen);
        let _ = self.terminal.clear();
        let _ = self.terminal.hide_cursor();
    }
}
