//! Public location of a stored derivative

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

// Unreserved characters plus the path separator stay as-is.
const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Build `<base_url>/<requested_name>` with exactly one separating slash.
pub fn derivative_location(base_url: &str, requested_name: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        utf8_percent_encode(requested_name, KEY_ENCODE_SET)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_URL: &str = "http://hackathon-img.s3-website-us-east-1.amazonaws.com/";

    #[test]
    fn test_location_is_base_url_plus_name() {
        assert_eq!(
            derivative_location(BASE_URL, "logo200x100.png"),
            format!("{BASE_URL}logo200x100.png")
        );
    }

    #[test]
    fn test_trailing_slash_is_normalised() {
        assert_eq!(
            derivative_location("http://localhost:4000/media", "a1x1.gif"),
            "http://localhost:4000/media/a1x1.gif"
        );
        assert_eq!(
            derivative_location("http://localhost:4000/media//", "a1x1.gif"),
            "http://localhost:4000/media/a1x1.gif"
        );
    }

    #[test]
    fn test_unsafe_characters_are_encoded() {
        assert_eq!(
            derivative_location(BASE_URL, "logo200x100.png copy#1"),
            format!("{BASE_URL}logo200x100.png%20copy%231")
        );
    }
}
