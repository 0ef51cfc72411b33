use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque X11 window handle.
///
/// Parsed once from the hex form the X tools print and always written back
/// in normalized `0x...` form, so `0x03a00003` and `0x3a00003` are the same
/// window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct WindowId(u64);

impl WindowId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl FromStr for WindowId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_end_matches(',');
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| format!("window id must be hexadecimal: {}", s))?;
        u64::from_str_radix(digits, 16)
            .map(WindowId)
            .map_err(|e| format!("invalid window id {}: {}", s, e))
    }
}

impl From<WindowId> for String {
    fn from(id: WindowId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for WindowId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_leading_zeros() {
        let a: WindowId = "0x03a00003".parse().unwrap();
        let b: WindowId = "0x3a00003".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "0x3a00003");
    }

    #[test]
    fn test_parse_rejects_decimal() {
        assert!("12345".parse::<WindowId>().is_err());
        assert!("0xzz".parse::<WindowId>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&WindowId::new(0x3a00003)).unwrap();
        assert_eq!(json, "\"0x3a00003\"");
        let id: WindowId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, WindowId::new(0x3a00003));
    }
}
