//! Fire-and-forget command launching
//!
//! Spawns configured command lines detached from the applet process. The
//! command line is split with shell-like quoting rules (single quotes,
//! double quotes, backslash escapes) but no expansion of any kind.

use crate::error::{PanelLogoError, Result, StringError};
use crate::shell::Launcher;
use std::process::{Command, Stdio};

/// Production [`Launcher`] over `std::process::Command`
pub struct CommandLauncher;

impl Launcher for CommandLauncher {
    fn spawn(&self, command_line: &str) -> Result<()> {
        use tracing::{debug, info};

        let argv = split_command_line(command_line)
            .map_err(|e| PanelLogoError::SpawnFailed(StringError::new(e)))?;
        let Some((program, args)) = argv.split_first() else {
            return Err(PanelLogoError::SpawnFailed(StringError::new(
                "empty command line",
            )));
        };

        info!("Spawning: {}", command_line);
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| PanelLogoError::SpawnFailed(Box::new(e)))?;

        // Reap the child off-thread so fire-and-forget spawns don't pile up
        // as zombies while the applet keeps running
        std::thread::spawn(move || {
            let _ = child.wait();
        });

        debug!("Spawned {} detached", program);
        Ok(())
    }
}

/// Split a command line into arguments with shell-like quoting.
///
/// Whitespace separates arguments; single quotes preserve everything
/// literally; double quotes preserve everything except backslash escapes;
/// a bare backslash escapes the next character. No variable, glob, or tilde
/// expansion happens.
pub fn split_command_line(line: &str) -> std::result::Result<Vec<String>, String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    enum Quote {
        None,
        Single,
        Double,
    }
    let mut quote = Quote::None;

    while let Some(c) = chars.next() {
        match quote {
            Quote::None => match c {
                '\'' => {
                    quote = Quote::Single;
                    in_word = true;
                }
                '"' => {
                    quote = Quote::Double;
                    in_word = true;
                }
                '\\' => {
                    let escaped = chars.next().ok_or("trailing backslash")?;
                    current.push(escaped);
                    in_word = true;
                }
                c if c.is_whitespace() => {
                    if in_word {
                        args.push(std::mem::take(&mut current));
                        in_word = false;
                    }
                }
                c => {
                    current.push(c);
                    in_word = true;
                }
            },
            Quote::Single => match c {
                '\'' => quote = Quote::None,
                c => current.push(c),
            },
            Quote::Double => match c {
                '"' => quote = Quote::None,
                '\\' => {
                    let escaped = chars.next().ok_or("trailing backslash")?;
                    // Inside double quotes only \" and \\ are escapes
                    if escaped != '"' && escaped != '\\' {
                        current.push('\\');
                    }
                    current.push(escaped);
                }
                c => current.push(c),
            },
        }
    }

    if !matches!(quote, Quote::None) {
        return Err("unterminated quote".to_string());
    }
    if in_word {
        args.push(current);
    }
    Ok(args)
}
