//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Supports:
/// - `${VAR}` - expands to the value of VAR, errors if unset
/// - `${VAR:-default}` - expands to VAR if set, otherwise uses default
///
/// Bare `$VAR` syntax is not expanded (only `${VAR}` with braces).
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of an environment variable that is not set.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("MAMBO_EXPAND_SIMPLE", "pk-123");
        }
        let result = expand_env("${MAMBO_EXPAND_SIMPLE}", "api.public_key").unwrap();
        assert_eq!(result, "pk-123");
        unsafe {
            std::env::remove_var("MAMBO_EXPAND_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MAMBO_EXPAND_UNSET");
        }
        let result = expand_env(
            "${MAMBO_EXPAND_UNSET:-https://api.mambo.io}",
            "api.server_url",
        )
        .unwrap();
        assert_eq!(result, "https://api.mambo.io");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MAMBO_EXPAND_MISSING");
        }
        let err = expand_env("${MAMBO_EXPAND_MISSING}", "api.private_key").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MAMBO_EXPAND_MISSING"));
        assert!(err.to_string().contains("api.private_key"));
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("MAMBO_EXPAND_HOST", "mambo.example.com");
        }
        let result = expand_env("https://${MAMBO_EXPAND_HOST}/api", "api.server_url").unwrap();
        assert_eq!(result, "https://mambo.example.com/api");
        unsafe {
            std::env::remove_var("MAMBO_EXPAND_HOST");
        }
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("se$cret", "api.private_key").unwrap();
        assert_eq!(result, "se$cret");
    }
}
