//! Environment variable helpers used by config and logging
//!
//! ```ignore
//! use taskring_core::env::{env_get, env_get_bool};
//!
//! let capacity: usize = env_get("TR_QUEUE_CAPACITY", 8);
//! let flush = env_get_bool("TR_FLUSH_EPRINT", false);
//! ```

use std::str::FromStr;

/// Parse `key` as `T`, falling back to `default` when unset or unparsable.
#[inline]
pub fn env_get<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    env_get_opt(key).unwrap_or(default)
}

/// `Some(T)` if `key` is set and parses, `None` otherwise.
#[inline]
pub fn env_get_opt<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// "1", "true", "yes", "on" (any case) are true; any other value is false.
/// Unset returns `default`.
#[inline]
pub fn env_get_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(val) => matches!(val.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_get_default() {
        let val: usize = env_get("__TR_TEST_UNSET_12345__", 42);
        assert_eq!(val, 42);

        let val: Option<usize> = env_get_opt("__TR_TEST_UNSET_12345__");
        assert!(val.is_none());

        assert!(env_get_bool("__TR_TEST_UNSET_12345__", true));
    }

    #[test]
    fn test_env_get_parses_and_trims() {
        std::env::set_var("__TR_TEST_NUM__", " 123 ");
        let val: usize = env_get("__TR_TEST_NUM__", 0);
        assert_eq!(val, 123);
        std::env::remove_var("__TR_TEST_NUM__");
    }

    #[test]
    fn test_env_get_invalid_parse() {
        std::env::set_var("__TR_TEST_INVALID__", "eight");
        let val: usize = env_get("__TR_TEST_INVALID__", 8);
        assert_eq!(val, 8);
        std::env::remove_var("__TR_TEST_INVALID__");
    }

    #[test]
    fn test_env_get_bool_variants() {
        for v in ["1", "true", "TRUE", "yes", "on"] {
            std::env::set_var("__TR_TEST_BOOL__", v);
            assert!(env_get_bool("__TR_TEST_BOOL__", false), "{v}");
        }
        for v in ["0", "false", "garbage"] {
            std::env::set_var("__TR_TEST_BOOL__", v);
            assert!(!env_get_bool("__TR_TEST_BOOL__", true), "{v}");
        }
        std::env::remove_var("__TR_TEST_BOOL__");
    }
}
