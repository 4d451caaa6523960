use std::io::Write;
use std::path::Path;

use cardscan_core::{Clipboard, CoreError, FileCandidate};

/// Clipboard that writes through the OSC 52 escape sequence.
/// Works in Ghostty, iTerm2, kitty, WezTerm, and most modern terminals.
pub struct Osc52Clipboard;

impl Clipboard for Osc52Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), CoreError> {
        use base64::Engine;
        let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
        // Write directly to stdout, bypassing the terminal backend buffer
        let mut stdout = std::io::stdout();
        stdout
            .write_all(format!("\x1b]52;c;{}\x07", encoded).as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| CoreError::Clipboard(e.to_string()))
    }
}

/// Build a candidate for an existing regular file, or the message explaining
/// why the path can't be used.
pub(super) fn candidate_for_path(path: &Path) -> Result<FileCandidate, String> {
    if !path.is_file() {
        return Err(format!("File not found: {}", path.display()));
    }
    Ok(FileCandidate::from_path(path))
}

/// Expand a leading `~` to the home directory.
pub(super) fn expand_home(input: &str) -> String {
    if let Some(rest) = input.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest).display().to_string();
    }
    input.to_string()
}
