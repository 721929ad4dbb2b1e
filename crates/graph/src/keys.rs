//! Inverse key mappings: turning slot indices and stored scalars back into text.
//!
//! Containers map each key character to a slot index before storing it (the
//! identity, an offset such as "count from `'a'`", or the position in a fixed
//! alphabet). Rendering applies the inverse so that edge and vertex labels
//! show the original characters.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// How a discriminant or stored scalar is turned into label text.
#[derive(Clone, Default)]
pub enum KeyMapping {
    /// Interpret the value as a character code
    #[default]
    Char,
    /// Inverse of counting from an offset: `char(value + offset)`
    CountFrom(u32),
    /// Inverse of an indexed alphabet: the `value`-th character
    Indexed(Vec<char>),
    /// Print the value as a decimal number
    Decimal,
    /// Caller-supplied mapping
    Custom(Arc<dyn Fn(u32) -> String + Send + Sync>),
}

impl KeyMapping {
    /// Wrap a closure as a key mapping.
    pub fn custom(f: impl Fn(u32) -> String + Send + Sync + 'static) -> Self {
        KeyMapping::Custom(Arc::new(f))
    }

    /// Map a value to its label text.
    pub fn label(&self, value: u32) -> String {
        match self {
            KeyMapping::Char => char_or_number(value),
            KeyMapping::CountFrom(offset) => match value.checked_add(*offset) {
                Some(code) => char_or_number(code),
                None => value.to_string(),
            },
            KeyMapping::Indexed(alphabet) => usize::try_from(value)
                .ok()
                .and_then(|i| alphabet.get(i))
                .map(|c| c.to_string())
                .unwrap_or_else(|| char_or_number(value)),
            KeyMapping::Decimal => value.to_string(),
            KeyMapping::Custom(f) => f(value),
        }
    }
}

fn char_or_number(code: u32) -> String {
    char::from_u32(code)
        .map(|c| c.to_string())
        .unwrap_or_else(|| code.to_string())
}

impl fmt::Debug for KeyMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMapping::Char => write!(f, "Char"),
            KeyMapping::CountFrom(offset) => f.debug_tuple("CountFrom").field(offset).finish(),
            KeyMapping::Indexed(alphabet) => f.debug_tuple("Indexed").field(alphabet).finish(),
            KeyMapping::Decimal => write!(f, "Decimal"),
            KeyMapping::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Error returned for an unrecognised key mapping specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKeyMappingError(String);

impl fmt::Display for ParseKeyMappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid key mapping '{}' (expected char, decimal, count-from:<n|c> or indexed:<chars>)",
            self.0
        )
    }
}

impl std::error::Error for ParseKeyMappingError {}

impl FromStr for KeyMapping {
    type Err = ParseKeyMappingError;

    /// Parse `char`, `decimal`, `count-from:<n>` (or `count-from:<c>` for a
    /// single character) and `indexed:<chars>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseKeyMappingError(s.to_string());
        match s.split_once(':') {
            None => match s {
                "char" => Ok(KeyMapping::Char),
                "decimal" => Ok(KeyMapping::Decimal),
                _ => Err(err()),
            },
            Some(("count-from", offset)) => {
                if let Ok(n) = offset.parse::<u32>() {
                    return Ok(KeyMapping::CountFrom(n));
                }
                let mut chars = offset.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(KeyMapping::CountFrom(c as u32)),
                    _ => Err(err()),
                }
            }
            Some(("indexed", alphabet)) if !alphabet.is_empty() => {
                Ok(KeyMapping::Indexed(alphabet.chars().collect()))
            }
            Some(_) => Err(err()),
        }
    }
}
