//! Requested-name parsing
//!
//! A requested name has the shape `<base><width>x<height>.<ext>`, e.g.
//! `logo200x100.png`. Parsing yields the key of the original image
//! (`logo.png`), the bounding box and the output encoding.

use crate::error::ParseError;
use crate::formats::{FormatPolicy, OutputFormat};
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::sync::LazyLock;

// Anchored at the start only: anything after the extension token stays part of
// the requested (derivative) name.
static DIMENSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z]+)([0-9]+)[xX]([0-9]+)(\.[a-zA-Z]+)")
        .expect("dimension pattern is a valid regex")
});

/// A validated resize request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    /// Decoded requested name; the derivative is stored under this key
    pub requested_name: String,
    pub base_name: String,
    /// Key of the original image in the source bucket
    pub source_key: String,
    pub width: u32,
    pub height: u32,
    /// Lower-cased extension without the dot
    pub extension: String,
    pub output_format: OutputFormat,
}

impl ParsedRequest {
    pub fn derivative_key(&self) -> &str {
        &self.requested_name
    }

    pub fn content_type(&self) -> &'static str {
        self.output_format.content_type()
    }
}

/// Parser bound to a format policy
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestParser {
    policy: FormatPolicy,
}

impl RequestParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: FormatPolicy) -> Self {
        Self { policy }
    }

    /// Parse and validate a (possibly percent-encoded) requested name.
    ///
    /// Checks run in a fixed order and stop at the first failure: pattern,
    /// extension presence, allow-list, format mapping, dimensions.
    pub fn parse(&self, raw_name: &str) -> Result<ParsedRequest, ParseError> {
        if has_malformed_escape(raw_name) {
            return Err(ParseError::InvalidEncoding(raw_name.to_string()));
        }

        let name = percent_decode_str(raw_name)
            .decode_utf8()
            .map_err(|_| ParseError::InvalidEncoding(raw_name.to_string()))?
            .into_owned();

        let captures = DIMENSION_PATTERN
            .captures(&name)
            .ok_or_else(|| ParseError::DimensionNotFound(name.clone()))?;

        let base_name = captures[1].to_string();
        let raw_width = &captures[2];
        let raw_height = &captures[3];
        let source_key = format!("{}{}", base_name, &captures[4]);

        let extension = match source_key.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => ext.to_string(),
            _ => return Err(ParseError::TypeInferenceFailed(source_key)),
        };

        if !self.policy.is_allowed(&extension) {
            return Err(ParseError::UnsupportedFileType(source_key));
        }

        let output_format = self
            .policy
            .output_format(&extension)
            .ok_or_else(|| ParseError::MissingMimeMapping(extension.clone()))?;

        let width = parse_dimension(raw_width);
        let height = parse_dimension(raw_height);
        let (width, height) = match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
            _ => return Err(ParseError::InvalidDimensions { width, height }),
        };

        Ok(ParsedRequest {
            requested_name: name,
            base_name,
            source_key,
            width,
            height,
            extension: extension.to_ascii_lowercase(),
            output_format,
        })
    }
}

/// `%` must introduce exactly two hex digits; `percent_decode_str` would
/// otherwise keep a stray `%` as a literal.
fn has_malformed_escape(raw_name: &str) -> bool {
    let bytes = raw_name.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !matches!(
                bytes.get(i + 1..i + 3),
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
            )
    })
}

/// Digits only (guaranteed by the pattern); values past `u64` saturate.
fn parse_dimension(digits: &str) -> u64 {
    digits.parse::<u64>().unwrap_or(u64::MAX)
}

/// Parse a requested name with the default format policy
pub fn parse_requested_name(raw_name: &str) -> Result<ParsedRequest, ParseError> {
    RequestParser::new().parse(raw_name)
}
