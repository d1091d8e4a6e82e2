use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Row id assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneId(pub i64);

impl PhoneId {
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PhoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PhoneId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::PhoneId;
    use std::str::FromStr;

    #[test]
    fn parse_and_display_agree() {
        let id = PhoneId::from_str(" 42 ").expect("parse id");
        assert_eq!(id, PhoneId(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn parse_rejects_non_numeric() {
        assert!(PhoneId::from_str("abc").is_err());
    }

    #[test]
    fn serializes_as_bare_integer() {
        let value = serde_json::to_value(PhoneId(7)).expect("serialize");
        assert_eq!(value, serde_json::json!(7));
    }
}
