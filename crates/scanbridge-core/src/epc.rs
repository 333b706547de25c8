use crate::error::Error;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// EPC tag identifier (hex string, even number of digits)
///
/// Tag identifiers cross the bridge as hex strings and reach the reader
/// as raw byte sequences, two digits per byte. The identifier is
/// normalized (trimmed and converted to uppercase) before validation.
/// Odd-length input is rejected rather than truncated to the nearest
/// byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Epc(String);

impl Epc {
    /// Parse and normalize a hex identifier.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The identifier is empty
    /// - The identifier has an odd number of digits
    /// - The identifier contains a non-hex character
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim().to_uppercase();

        if s.is_empty() {
            return Err(Error::EmptyIdentifier);
        }

        if s.len() % 2 != 0 {
            return Err(Error::OddLengthHex(s.len()));
        }

        if let Some((position, digit)) = s.chars().enumerate().find(|(_, c)| !c.is_ascii_hexdigit())
        {
            return Err(Error::InvalidHexDigit { digit, position });
        }

        Ok(Epc(s))
    }

    /// Build an identifier from raw reader bytes.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Epc(bytes.iter().map(|b| format!("{:02X}", b)).collect())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to the raw byte sequence passed to the reader.
    ///
    /// Pairs hex digits two at a time; an identifier of N digits yields
    /// N/2 bytes.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        fn nibble(b: u8) -> u8 {
            match b {
                b'0'..=b'9' => b - b'0',
                // parse() guarantees uppercase hex
                _ => b - b'A' + 10,
            }
        }

        self.0
            .as_bytes()
            .chunks_exact(2)
            .map(|pair| (nibble(pair[0]) << 4) | nibble(pair[1]))
            .collect()
    }

    /// Number of bytes the identifier encodes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.0.len() / 2
    }
}

impl fmt::Display for Epc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Epc {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Epc::parse(s)
    }
}
