//! System clipboard via xclip / xsel

use emoji_finder::{Clipboard, ClipboardError};
use std::io::Write;
use std::process::{Command, Stdio};

/// Helper programs tried in order
#[cfg(target_os = "linux")]
const HELPERS: &[(&str, &[&str])] = &[("xclip", &["-selection", "clipboard"]), ("xsel", &["--clipboard", "--input"])];

#[cfg(not(target_os = "linux"))]
const HELPERS: &[(&str, &[&str])] = &[];

/// Desktop clipboard
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        pipe_to_first(HELPERS, text)
    }
}

/// Feed `text` to each helper until one exits successfully
fn pipe_to_first(helpers: &[(&str, &[&str])], text: &str) -> Result<(), ClipboardError> {
    let mut last = ClipboardError::Unavailable("no clipboard helper on this platform".to_string());

    for &(program, args) in helpers {
        match pipe_to(program, args, text) {
            Ok(()) => return Ok(()),
            Err(e) => {
                tracing::debug!("{} failed: {}", program, e);
                last = e;
            }
        }
    }
    Err(last)
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<(), ClipboardError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ClipboardError::Unavailable(format!("{}: {}", program, e)))?;

    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };
    let status = child.wait()?;
    if !status.success() {
        return Err(ClipboardError::Unavailable(format!("{} exited with {}", program, status)));
    }
    Ok(written?)
}
