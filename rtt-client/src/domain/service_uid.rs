//! RTT service UID type.

use std::fmt;

/// Error returned when a service UID is blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("service UID cannot be blank")]
pub struct InvalidServiceUid;

/// A Realtime Trains service unique identifier (e.g. `"W72814"`).
///
/// These are stable for a given run date, so a
/// `(ServiceUid, NaiveDate)` pair names exactly one train. Surrounding
/// whitespace is stripped; nothing else is checked.
///
/// # Examples
///
/// ```
/// use rtt_client::domain::ServiceUid;
///
/// let uid = ServiceUid::parse(" W72814 ").unwrap();
/// assert_eq!(uid.as_str(), "W72814");
///
/// assert!(ServiceUid::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceUid(String);

impl ServiceUid {
    /// Parse a UID, rejecting empty or all-whitespace input.
    pub fn parse(s: &str) -> Result<Self, InvalidServiceUid> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidServiceUid);
        }
        Ok(ServiceUid(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ServiceUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceUid({})", self.0)
    }
}

impl fmt::Display for ServiceUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
