use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Shortest address accepted by the scanner.
pub const MIN_ADDRESS_LEN: usize = 32;
/// Longest base58 encoding of a 32-byte public key.
pub const MAX_ADDRESS_LEN: usize = 44;

static BASE58: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[1-9A-HJ-NP-Za-km-z]+$").expect("base58 alphabet regex is valid")
});

/// A trimmed, validated Solana mint address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenAddress(String);

impl TokenAddress {
    /// Validate user input and wrap it.
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AddressError::Empty);
        }
        let len = trimmed.chars().count();
        if len < MIN_ADDRESS_LEN {
            return Err(AddressError::TooShort { len });
        }
        if len > MAX_ADDRESS_LEN {
            return Err(AddressError::TooLong { len });
        }
        if !BASE58.is_match(trimmed) {
            let found = trimmed
                .chars()
                .find(|c| !BASE58.is_match(c.encode_utf8(&mut [0; 4])))
                .unwrap_or('?');
            return Err(AddressError::InvalidCharacter { found });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `ABCDEFGH...UVWXYZ`, used in the report header.
    pub fn short(&self) -> String {
        format!("{}...{}", head(&self.0, 8), tail(&self.0, 6))
    }

    /// Name shown when the API has no token metadata.
    pub fn placeholder_name(&self) -> String {
        format!("{}...", head(&self.0, 6))
    }

    /// Label used in the scan log.
    pub fn scan_label(&self) -> String {
        format!("{}...{}", head(&self.0, 6), tail(&self.0, 4))
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TokenAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Reasons an address is rejected before any request is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("address must not be blank")]
    Empty,
    #[error("address is too short ({len} chars, expected at least {MIN_ADDRESS_LEN})")]
    TooShort { len: usize },
    #[error("address is too long ({len} chars, expected at most {MAX_ADDRESS_LEN})")]
    TooLong { len: usize },
    #[error("address contains non-base58 character `{found}`")]
    InvalidCharacter { found: char },
}

pub(crate) fn head(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

pub(crate) fn tail(s: &str, n: usize) -> &str {
    let count = s.chars().count();
    if count <= n {
        return s;
    }
    match s.char_indices().nth(count - n) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}
