//! Plaintext secret values.
//!
//! A [`SecretValue`] is the byte sequence that gets sealed. Non-string
//! scalars (numbers, booleans) are stringified on construction, so a YAML
//! document may mix quoted and bare values freely. The plaintext is wiped
//! from memory on drop and never appears in Debug output.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::ConfigError;

/// A plaintext secret value, ready to seal.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretValue(String);

impl SecretValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Build a value from one entry of a parsed YAML document.
    ///
    /// Strings are taken as-is; numbers and booleans are stringified the
    /// way they would print. Null, sequences, and mappings have no sensible
    /// secret representation and are rejected.
    pub fn from_yaml(key: &str, value: &serde_yaml::Value) -> Result<Self, ConfigError> {
        use serde_yaml::Value;

        let unsupported = |kind| ConfigError::UnsupportedValue {
            key: key.to_string(),
            kind,
        };

        match value {
            Value::String(s) => Ok(Self::new(s.clone())),
            Value::Number(n) => Ok(Self::new(n.to_string())),
            Value::Bool(b) => Ok(Self::new(b.to_string())),
            Value::Null => Err(unsupported("null")),
            Value::Sequence(_) => Err(unsupported("sequence")),
            Value::Mapping(_) => Err(unsupported("mapping")),
            Value::Tagged(_) => Err(unsupported("tagged value")),
        }
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretValue(<redacted>)")
    }
}

impl From<&str> for SecretValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SecretValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<bool> for SecretValue {
    fn from(value: bool) -> Self {
        Self::new(value.to_string())
    }
}

impl From<i64> for SecretValue {
    fn from(value: i64) -> Self {
        Self::new(value.to_string())
    }
}

impl From<f64> for SecretValue {
    fn from(value: f64) -> Self {
        Self::new(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(doc: &str) -> serde_yaml::Value {
        serde_yaml::from_str(doc).unwrap()
    }

    #[test]
    fn test_string_value_unchanged() {
        let value = SecretValue::from_yaml("API_KEY", &yaml("abc123")).unwrap();
        assert_eq!(value.as_str(), "abc123");
    }

    #[test]
    fn test_number_value_stringified() {
        let value = SecretValue::from_yaml("PORT", &yaml("8080")).unwrap();
        assert_eq!(value.as_str(), "8080");

        let value = SecretValue::from_yaml("RATIO", &yaml("0.5")).unwrap();
        assert_eq!(value.as_str(), "0.5");
    }

    #[test]
    fn test_bool_value_stringified() {
        let value = SecretValue::from_yaml("DEBUG", &yaml("true")).unwrap();
        assert_eq!(value.as_str(), "true");
    }

    #[test]
    fn test_stringified_matches_string_form() {
        assert_eq!(SecretValue::from(8080i64), SecretValue::from("8080"));
        assert_eq!(SecretValue::from(false), SecretValue::from("false"));
    }

    #[test]
    fn test_null_rejected() {
        let err = SecretValue::from_yaml("EMPTY", &yaml("null")).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnsupportedValue { kind: "null", .. }
        ));
    }

    #[test]
    fn test_nested_values_rejected() {
        assert!(SecretValue::from_yaml("LIST", &yaml("[1, 2]")).is_err());
        assert!(SecretValue::from_yaml("MAP", &yaml("a: b")).is_err());
    }

    #[test]
    fn test_debug_redacts() {
        let value = SecretValue::from("hunter2");
        assert_eq!(format!("{:?}", value), "SecretValue(<redacted>)");
    }
}
