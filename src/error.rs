// SPDX-License-Identifier: MIT
//
// Errors at the picker's fallible edges: reading the config, parsing the
// starting color, talking to the terminal and the clipboard. Everything
// below that (math, state, grid, pointer) cannot fail.

use std::fmt;
use std::io;

use n_color::ParseColorError;

#[derive(Debug)]
pub enum PickError {
    /// Terminal or file I/O.
    Io(io::Error),
    /// Config file that could be read but not used.
    Config(String),
    /// A color string from `--color` or the config file.
    Color(ParseColorError),
    /// The clipboard refused the text.
    Clipboard(String),
}

impl fmt::Display for PickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Config(e) => write!(f, "Config error: {e}"),
            Self::Color(e) => write!(f, "Color error: {e}"),
            Self::Clipboard(e) => write!(f, "Clipboard error: {e}"),
        }
    }
}

impl std::error::Error for PickError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Color(e) => Some(e),
            Self::Config(_) | Self::Clipboard(_) => None,
        }
    }
}

impl From<io::Error> for PickError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseColorError> for PickError {
    fn from(e: ParseColorError) -> Self {
        Self::Color(e)
    }
}

pub type Result<T> = std::result::Result<T, PickError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn from_io_error() {
        let e: PickError = io::Error::new(io::ErrorKind::BrokenPipe, "gone").into();
        assert!(matches!(e, PickError::Io(_)));
        assert!(e.source().is_some());
        assert_eq!(e.to_string(), "I/O error: gone");
    }

    #[test]
    fn from_parse_error() {
        let parse_err = n_color::parse("#12").unwrap_err();
        let e: PickError = parse_err.into();
        assert!(matches!(e, PickError::Color(_)));
        assert!(e.source().is_some());
        assert!(e.to_string().starts_with("Color error: "));
    }

    #[test]
    fn display_config_error() {
        let e = PickError::Config("tick_interval_us must be positive".into());
        assert_eq!(e.to_string(), "Config error: tick_interval_us must be positive");
        assert!(e.source().is_none());
    }

    #[test]
    fn display_clipboard_error() {
        let e = PickError::Clipboard("stdout closed".into());
        assert_eq!(e.to_string(), "Clipboard error: stdout closed");
    }

    #[test]
    fn question_mark_converts() {
        fn parse_it() -> Result<n_color::Rgb> {
            Ok(n_color::parse("nope")?)
        }
        assert!(matches!(parse_it(), Err(PickError::Color(_))));
    }
}
