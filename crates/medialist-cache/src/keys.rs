//! Cache key builders for all MediaList cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses. Namespacing for shared
//! backends is not done here: the Redis client prepends its configured
//! `key_prefix` to every key it touches.

/// Cache key for a session entry: access token -> owning user id.
///
/// Raw tokens are long; keys use the token verbatim so that lookup on an
/// incoming request is a single GET with no extra hashing state to manage.
pub fn session(access_token: &str) -> String {
    format!("session:{access_token}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key_has_no_namespace_prefix() {
        // The Redis client adds the configured prefix itself; a prefix
        // here would double up as `medialist:medialist:...`.
        assert_eq!(session("abc.def.ghi"), "session:abc.def.ghi");
    }
}
