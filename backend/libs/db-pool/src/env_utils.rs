//! Environment variable parsing utilities
//!
//! Shared by the pool configuration and the service configuration so both
//! read the environment the same way.

use std::fmt::Display;
use std::str::FromStr;

/// Parse an environment variable, using `default` only when it is missing.
///
/// A value that is present but malformed is an error, so a typo in a
/// deployment manifest does not silently fall back to the default.
pub fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse()
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(default),
    }
}

/// Parse a required environment variable
///
/// # Example
/// ```ignore
/// let secret = parse_env_required::<String>("JWT_SECRET")?;
/// ```
pub fn parse_env_required<T: FromStr>(key: &str) -> Result<T, String> {
    std::env::var(key)
        .map_err(|_| format!("Environment variable {} not found", key))?
        .parse()
        .map_err(|_| format!("Failed to parse environment variable {}", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[serial_test::serial]
    fn test_parse_env_or_default_rejects_garbage() {
        assert_eq!(parse_env_or_default("NONEXISTENT_VAR_XYZ", 7u64), Ok(7));

        std::env::set_var("TEST_TIMEOUT", " 250 ");
        assert_eq!(parse_env_or_default("TEST_TIMEOUT", 7u64), Ok(250));

        std::env::set_var("TEST_TIMEOUT", "soon");
        let err = parse_env_or_default("TEST_TIMEOUT", 7u64).unwrap_err();
        assert!(err.contains("TEST_TIMEOUT"));
        std::env::remove_var("TEST_TIMEOUT");
    }

    #[test]
    #[serial_test::serial]
    fn test_parse_env_required() {
        let err = parse_env_required::<u32>("NONEXISTENT_VAR_XYZ").unwrap_err();
        assert!(err.contains("NONEXISTENT_VAR_XYZ"));

        std::env::set_var("TEST_REQ", "456");
        let result = parse_env_required::<u32>("TEST_REQ");
        assert_eq!(result, Ok(456));
        std::env::remove_var("TEST_REQ");
    }
}
