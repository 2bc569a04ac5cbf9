//! Country code type.

use std::fmt;

/// Error returned when parsing an invalid country code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid country code: {reason}")]
pub struct InvalidCountryCode {
    reason: &'static str,
}

/// A valid ISO 3166-1 alpha-2 country code.
///
/// Country codes are always 2 uppercase ASCII letters. This type guarantees
/// that any `CountryCode` value is valid by construction, which makes it
/// safe to use as a cache key and in request URLs.
///
/// # Examples
///
/// ```
/// use charger_server::domain::CountryCode;
///
/// let rs = CountryCode::parse("RS").unwrap();
/// assert_eq!(rs.as_str(), "RS");
///
/// // Lowercase is rejected
/// assert!(CountryCode::parse("rs").is_err());
///
/// // Wrong length is rejected
/// assert!(CountryCode::parse("R").is_err());
/// assert!(CountryCode::parse("SRB").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountryCode([u8; 2]);

impl CountryCode {
    /// Parse a country code from a string.
    ///
    /// The input must be exactly 2 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidCountryCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 2 {
            return Err(InvalidCountryCode {
                reason: "must be exactly 2 characters",
            });
        }

        for &b in bytes {
            if !b.is_ascii_uppercase() {
                return Err(InvalidCountryCode {
                    reason: "must be uppercase ASCII letters A-Z",
                });
            }
        }

        Ok(CountryCode([bytes[0], bytes[1]]))
    }

    /// Returns the country code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store valid ASCII uppercase letters
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl fmt::Debug for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CountryCode({})", self.as_str())
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(CountryCode::parse("RS").is_ok());
        assert!(CountryCode::parse("XK").is_ok());
        assert!(CountryCode::parse("BA").is_ok());
        assert!(CountryCode::parse("AA").is_ok());
        assert!(CountryCode::parse("ZZ").is_ok());
    }

    #[test]
    fn reject_lowercase() {
        assert!(CountryCode::parse("rs").is_err());
        assert!(CountryCode::parse("Rs").is_err());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(CountryCode::parse("").is_err());
        assert!(CountryCode::parse("R").is_err());
        assert!(CountryCode::parse("SRB").is_err());
    }

    #[test]
    fn reject_non_letters() {
        assert!(CountryCode::parse("R1").is_err());
        assert!(CountryCode::parse("R ").is_err());
        assert!(CountryCode::parse("R-").is_err());
    }

    #[test]
    fn display_and_debug() {
        let code = CountryCode::parse("BA").unwrap();
        assert_eq!(format!("{}", code), "BA");
        assert_eq!(format!("{:?}", code), "CountryCode(BA)");
    }

    #[test]
    fn usable_as_map_key() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(CountryCode::parse("RS").unwrap());
        assert!(set.contains(&CountryCode::parse("RS").unwrap()));
        assert!(!set.contains(&CountryCode::parse("BA").unwrap()));
    }
}
