//! URL encoding utilities for constructing safe API paths.
//!
//! Provides percent-encoding for URL path segments taken from caller input
//! (user emails, notification ids, service ids) so they cannot alter the
//! request path.
//!
//! # Security Considerations
//!
//! Without percent-encoding, special characters in resource names could:
//! - Cause path traversal (`../admin` or `a/b` would create nested paths)
//! - Break URL parsing (`id?x=1` would create a query parameter)
//! - Cause double-decode issues (`a%20b` might be decoded prematurely)
//!
//! # Example
//!
//! ```
//! use selfmade_client::endpoints::url_encoding::encode_path_segment;
//!
//! let encoded = encode_path_segment("a/b");
//! assert_eq!(encoded, "a%2Fb");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters that must be percent-encoded in URL path segments.
///
/// Based on RFC 3986 section 3.3, plus characters that are reserved or
/// commonly mangled by proxies:
/// - Space, quotes, angle brackets: problematic in URLs
/// - Backslash, pipe, caret, backtick, tilde: often blocked or problematic
/// - Plus, comma, semicolon: can have special meaning in some contexts
/// - Curly braces, square brackets: reserved in URI templates
/// - Percent: must be encoded to prevent double-encoding issues
/// - Slash: must be encoded to prevent path traversal
/// - Question mark and hash: have special URL meaning
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')      // Space
    .add(b'"')      // Double quote
    .add(b'<')      // Less than
    .add(b'>')      // Greater than
    .add(b'`')      // Backtick
    .add(b'{')      // Left curly brace
    .add(b'}')      // Right curly brace
    .add(b'|')      // Pipe
    .add(b'\\')     // Backslash
    .add(b'^')      // Caret
    .add(b'~')      // Tilde
    .add(b'%')      // Percent (prevents double-encoding)
    .add(b'/')      // Forward slash (prevents path traversal)
    .add(b'?')      // Question mark
    .add(b'#')      // Hash
    .add(b'+')      // Plus
    .add(b',')      // Comma
    .add(b';')      // Semicolon
    .add(b'[')      // Left square bracket
    .add(b']'); // Right square bracket

/// Percent-encode a string for safe use as a URL path segment.
///
/// Use it for every caller-provided value interpolated into an API path.
///
/// # Examples
///
/// ```
/// use selfmade_client::endpoints::url_encoding::encode_path_segment;
///
/// assert_eq!(encode_path_segment("redis"), "redis");
/// assert_eq!(encode_path_segment("ann+labs@example.com"), "ann%2Blabs@example.com");
/// assert_eq!(encode_path_segment("../admin"), "..%2Fadmin");
/// ```
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ids_pass_through() {
        assert_eq!(encode_path_segment("postgresql"), "postgresql");
        assert_eq!(encode_path_segment("65a1f0c2e4b0a1b2c3d4e5f6"), "65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(encode_path_segment("kali-linux"), "kali-linux");
        assert_eq!(encode_path_segment("my_lab.v2"), "my_lab.v2");
    }

    #[test]
    fn test_email_keeps_at_sign() {
        assert_eq!(encode_path_segment("admin@example.com"), "admin@example.com");
        assert_eq!(
            encode_path_segment("ann+labs@example.com"),
            "ann%2Blabs@example.com"
        );
    }

    #[test]
    fn test_slash_is_encoded() {
        assert_eq!(encode_path_segment("../admin"), "..%2Fadmin");
        assert_eq!(encode_path_segment("a/b/c"), "a%2Fb%2Fc");
    }

    #[test]
    fn test_query_and_fragment_are_encoded() {
        assert_eq!(encode_path_segment("id?unread_only=true"), "id%3Funread_only=true");
        assert_eq!(encode_path_segment("id#top"), "id%23top");
    }

    #[test]
    fn test_percent_and_space_are_encoded() {
        assert_eq!(encode_path_segment("a%20b"), "a%2520b");
        assert_eq!(encode_path_segment("two words"), "two%20words");
    }

    #[test]
    fn test_unicode_is_encoded() {
        assert_eq!(encode_path_segment("jos\u{00e9}@example.com"), "jos%C3%A9@example.com");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(encode_path_segment(""), "");
    }
}
