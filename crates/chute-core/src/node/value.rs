//! Typed conversion between config node strings and Rust values.
//!
//! Every value in a [`ConfigNode`](super::ConfigNode) is stored as text.  The
//! [`ConfigValue`] trait describes how a Rust type is written into that text
//! and read back out of it.  The formats follow what the game itself writes:
//!
//! | Type      | Written as      | Accepted on read                    |
//! |-----------|-----------------|-------------------------------------|
//! | `bool`    | `True`/`False`  | `true`/`false` in any letter case   |
//! | integers  | decimal         | decimal, surrounding spaces ignored |
//! | `f32`     | shortest form   | anything `f32::from_str` accepts    |
//! | `String`  | as-is           | as-is                               |

use thiserror::Error;

/// Error returned when a stored string cannot be converted to the requested type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot read {raw:?} as {expected}")]
pub struct ValueError {
    /// The raw text found in the node.
    pub raw: String,
    /// Human-readable name of the requested type.
    pub expected: &'static str,
}

impl ValueError {
    pub fn new(raw: &str, expected: &'static str) -> Self {
        Self {
            raw: raw.to_string(),
            expected,
        }
    }
}

/// A value that can be stored in a config node.
pub trait ConfigValue: Sized {
    /// Formats the value the way it is written to disk.
    fn to_config_string(&self) -> String;

    /// Parses a value from its on-disk text.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError`] when `raw` is not a valid representation.
    fn from_config_str(raw: &str) -> Result<Self, ValueError>;
}

impl ConfigValue for bool {
    fn to_config_string(&self) -> String {
        let text = if *self { "True" } else { "False" };
        text.to_string()
    }

    fn from_config_str(raw: &str) -> Result<Self, ValueError> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ValueError::new(raw, "bool"))
        }
    }
}

impl ConfigValue for String {
    fn to_config_string(&self) -> String {
        self.clone()
    }

    fn from_config_str(raw: &str) -> Result<Self, ValueError> {
        Ok(raw.to_string())
    }
}

impl ConfigValue for f32 {
    fn to_config_string(&self) -> String {
        self.to_string()
    }

    fn from_config_str(raw: &str) -> Result<Self, ValueError> {
        raw.trim()
            .parse()
            .map_err(|_| ValueError::new(raw, "float"))
    }
}

macro_rules! impl_config_value_int {
    ($($ty:ty),*) => {
        $(
            impl ConfigValue for $ty {
                fn to_config_string(&self) -> String {
                    self.to_string()
                }

                fn from_config_str(raw: &str) -> Result<Self, ValueError> {
                    raw.trim()
                        .parse()
                        .map_err(|_| ValueError::new(raw, stringify!($ty)))
                }
            }
        )*
    };
}

impl_config_value_int!(i32, u32, i64, u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_is_written_capitalised() {
        assert_eq!(true.to_config_string(), "True");
        assert_eq!(false.to_config_string(), "False");
    }

    #[test]
    fn test_bool_parse_ignores_case_and_whitespace() {
        assert_eq!(bool::from_config_str("TRUE"), Ok(true));
        assert_eq!(bool::from_config_str(" false "), Ok(false));
        assert_eq!(bool::from_config_str("True"), Ok(true));
    }

    #[test]
    fn test_bool_parse_rejects_numbers() {
        let err = bool::from_config_str("1").unwrap_err();
        assert_eq!(err.expected, "bool");
        assert_eq!(err.raw, "1");
    }

    #[test]
    fn test_float_parse_accepts_negative_and_fraction() {
        assert_eq!(f32::from_config_str("-12.5"), Ok(-12.5));
    }

    #[test]
    fn test_float_parse_rejects_text() {
        assert!(f32::from_config_str("fast").is_err());
    }

    #[test]
    fn test_integer_parse_trims_spaces() {
        assert_eq!(i32::from_config_str(" 42 "), Ok(42));
        assert!(u32::from_config_str("-1").is_err());
    }

    #[test]
    fn test_value_error_message_names_type() {
        let err = ValueError::new("maybe", "bool");
        assert_eq!(err.to_string(), "cannot read \"maybe\" as bool");
    }
}
