//! Share capability: hand a payload to the user's clipboard when possible.
//!
//! Destinations implement [`ShareSink`]. The default sink writes the OSC 52
//! escape, which most modern terminals map to the system clipboard.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::io::{self, Write};

/// Result of a share attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Payload was handed to the clipboard
    Copied,
    /// No clipboard surface available; caller should fall back to printing
    Unsupported,
}

/// A destination a share payload can be handed to.
pub trait ShareSink {
    fn share(&mut self, payload: &str) -> io::Result<ShareOutcome>;
}

/// Clipboard sink using the OSC 52 terminal escape.
pub struct OscClipboard<W: Write> {
    out: W,
    enabled: bool,
}

impl OscClipboard<io::Stdout> {
    /// Sink writing to stdout, enabled only when stdout is a terminal
    pub fn stdout() -> Self {
        Self {
            out: io::stdout(),
            enabled: atty::is(atty::Stream::Stdout),
        }
    }
}

impl<W: Write> OscClipboard<W> {
    /// Sink writing to an arbitrary target; tests capture the escape here
    pub fn new(out: W, enabled: bool) -> Self {
        Self { out, enabled }
    }
}

impl<W: Write> ShareSink for OscClipboard<W> {
    fn share(&mut self, payload: &str) -> io::Result<ShareOutcome> {
        if !self.enabled {
            return Ok(ShareOutcome::Unsupported);
        }
        let encoded = STANDARD.encode(payload.as_bytes());
        write!(self.out, "\x1b]52;c;{}\x07", encoded)?;
        self.out.flush()?;
        Ok(ShareOutcome::Copied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_sink_emits_an_osc52_escape() {
        let mut buffer: Vec<u8> = Vec::new();
        let outcome = OscClipboard::new(&mut buffer, true)
            .share("payload")
            .unwrap();

        assert_eq!(outcome, ShareOutcome::Copied);
        let written = String::from_utf8(buffer).unwrap();
        assert!(written.starts_with("\x1b]52;c;"));
        assert!(written.ends_with('\x07'));
        assert!(written.contains(&STANDARD.encode("payload")));
    }

    #[test]
    fn disabled_sink_reports_unsupported_and_writes_nothing() {
        let mut buffer: Vec<u8> = Vec::new();
        let outcome = OscClipboard::new(&mut buffer, false)
            .share("payload")
            .unwrap();

        assert_eq!(outcome, ShareOutcome::Unsupported);
        assert!(buffer.is_empty());
    }
}
