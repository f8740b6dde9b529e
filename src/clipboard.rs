//! Terminal clipboard via the OSC 52 escape sequence

use std::io::Write;

use base64::Engine;

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("OSC 52 clipboard write failed: {0}")]
    Osc52(#[from] std::io::Error),
}

/// Escape sequence asking the terminal to put `text` on the system clipboard
pub fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text);
    format!("\x1b]52;c;{}\x1b\\", encoded)
}

/// Copy `text` through the terminal. Works over SSH when the terminal allows it.
pub fn copy(text: &str) -> Result<(), ClipboardError> {
    let mut stdout = std::io::stdout();
    stdout.write_all(osc52_sequence(text).as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence_encodes_text() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x1b\\");
    }

    #[test]
    fn test_osc52_keeps_newlines_inside_payload() {
        let seq = osc52_sequence("a.jpg\nb.mp4");
        assert!(!seq.contains('\n'));
        assert!(seq.starts_with("\x1b]52;c;"));
    }
}
