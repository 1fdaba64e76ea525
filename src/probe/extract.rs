//! Source-specific extraction of an address from a response body.

use std::fmt;

use super::ExtractError;

/// Text that precedes the address in a dyndns response.
const DYNDNS_MARKER: &str = "Current IP Address:";

/// Text that follows the address in a dyndns response.
const DYNDNS_POSTAMBLE: &str = "</body>";

/// How the address is pulled out of an endpoint's response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Extractor {
    /// The body is the address, possibly surrounded by whitespace.
    #[default]
    PlainText,
    /// The body is the `checkip.dyndns.com` HTML page:
    /// `<html>...<body>Current IP Address: A.B.C.D</body></html>`.
    DynDns,
}

impl Extractor {
    /// Extracts the address from `body`.
    ///
    /// The result is trimmed of surrounding whitespace.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::MissingMarker`] if a markup extractor does not
    ///   find its marker
    /// - [`ExtractError::Empty`] if nothing is left after trimming
    pub fn extract(self, body: &str) -> Result<String, ExtractError> {
        match self {
            Self::PlainText => non_empty(body),
            Self::DynDns => {
                let start = body.find(DYNDNS_MARKER).ok_or(ExtractError::MissingMarker {
                    marker: DYNDNS_MARKER,
                })? + DYNDNS_MARKER.len();
                let rest = &body[start..];
                let end = rest.find(DYNDNS_POSTAMBLE).unwrap_or(rest.len());
                non_empty(&rest[..end])
            }
        }
    }

    /// Configuration name of this extractor.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PlainText => "plain",
            Self::DynDns => "dyndns",
        }
    }

    /// Looks up an extractor by configuration name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "plain" | "text" | "plaintext" => Some(Self::PlainText),
            "dyndns" => Some(Self::DynDns),
            _ => None,
        }
    }
}

impl fmt::Display for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn non_empty(text: &str) -> Result<String, ExtractError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(ExtractError::Empty)
    } else {
        Ok(trimmed.to_string())
    }
}
