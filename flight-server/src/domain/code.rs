//! Location code types.

use std::fmt;

/// Longest accepted location code.
const MAX_CODE_LEN: usize = 8;

/// Error returned when parsing an invalid location code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid location code {input:?}: {reason}")]
pub struct InvalidLocationCode {
    input: String,
    reason: &'static str,
}

/// A valid location code, such as an airport's "MSN" or "ORD".
///
/// Codes are 1 to 8 uppercase ASCII letters or digits. Any `LocationCode`
/// value is valid by construction.
///
/// # Examples
///
/// ```
/// use flight_server::domain::LocationCode;
///
/// let ord = LocationCode::parse("ORD").unwrap();
/// assert_eq!(ord.as_str(), "ORD");
///
/// // Strict parsing rejects lowercase
/// assert!(LocationCode::parse("ord").is_err());
///
/// // Normalized parsing trims and uppercases
/// assert_eq!(LocationCode::parse_normalized(" ord ").unwrap(), ord);
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocationCode(String);

impl LocationCode {
    /// Parse a location code from a string.
    ///
    /// The input must already be uppercase.
    pub fn parse(s: &str) -> Result<Self, InvalidLocationCode> {
        let fail = |reason| {
            Err(InvalidLocationCode {
                input: s.to_string(),
                reason,
            })
        };

        if s.is_empty() {
            return fail("must not be empty");
        }
        if s.len() > MAX_CODE_LEN {
            return fail("must be at most 8 characters");
        }
        if !s
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return fail("must be uppercase ASCII letters or digits");
        }

        Ok(Self(s.to_string()))
    }

    /// Parse user input: surrounding whitespace is trimmed and letters
    /// are uppercased before validation.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidLocationCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocationCode({})", self.0)
    }
}

impl fmt::Display for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
