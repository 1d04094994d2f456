//! Fixed extension tables
//!
//! The allow-list and the extension → output format mapping are plain data so
//! they can be inspected and tested on their own. An extension may be allowed
//! without having a mapping; the parser reports that case explicitly instead of
//! falling back to a default encoding.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Output encoding for a derivative image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg,
    Png,
    Gif,
}

impl OutputFormat {
    /// Encoding identifier, also used as the `image/<id>` subtype
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::Gif => "gif",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::Gif => "image/gif",
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Extensions accepted in a requested name (compared lower-cased)
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "png", "gif", "webp"];

/// Extension → output encoding. `webp` is allowed but intentionally unmapped.
pub const EXTENSION_FORMATS: &[(&str, OutputFormat)] = &[
    ("jpg", OutputFormat::Jpeg),
    ("jpe", OutputFormat::Jpeg),
    ("jpeg", OutputFormat::Jpeg),
    ("png", OutputFormat::Png),
    ("gif", OutputFormat::Gif),
];

/// Allow-list plus mapping table used by the request parser.
#[derive(Debug, Clone, Copy)]
pub struct FormatPolicy {
    allowed: &'static [&'static str],
    mappings: &'static [(&'static str, OutputFormat)],
}

impl FormatPolicy {
    pub const fn new(
        allowed: &'static [&'static str],
        mappings: &'static [(&'static str, OutputFormat)],
    ) -> Self {
        Self { allowed, mappings }
    }

    /// Case-insensitive allow-list check
    pub fn is_allowed(&self, extension: &str) -> bool {
        let extension = extension.to_ascii_lowercase();
        self.allowed.iter().any(|allowed| *allowed == extension)
    }

    /// Resolve an extension to its output encoding, if the table has one
    pub fn output_format(&self, extension: &str) -> Option<OutputFormat> {
        let extension = extension.to_ascii_lowercase();
        self.mappings
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, format)| *format)
    }

    /// Allowed extensions that have no mapping entry
    pub fn unmapped_extensions(&self) -> Vec<&'static str> {
        self.allowed
            .iter()
            .copied()
            .filter(|ext| self.output_format(ext).is_none())
            .collect()
    }
}

impl Default for FormatPolicy {
    fn default() -> Self {
        FormatPolicy::new(ALLOWED_EXTENSIONS, EXTENSION_FORMATS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_list_is_case_insensitive() {
        let policy = FormatPolicy::default();
        assert!(policy.is_allowed("jpg"));
        assert!(policy.is_allowed("PNG"));
        assert!(policy.is_allowed("Gif"));
        assert!(policy.is_allowed("webp"));
        assert!(!policy.is_allowed("bmp"));
        assert!(!policy.is_allowed("jpeg"));
    }

    #[test]
    fn test_output_format_lookup() {
        let policy = FormatPolicy::default();
        assert_eq!(policy.output_format("jpg"), Some(OutputFormat::Jpeg));
        assert_eq!(policy.output_format("jpe"), Some(OutputFormat::Jpeg));
        assert_eq!(policy.output_format("JPEG"), Some(OutputFormat::Jpeg));
        assert_eq!(policy.output_format("png"), Some(OutputFormat::Png));
        assert_eq!(policy.output_format("gif"), Some(OutputFormat::Gif));
        assert_eq!(policy.output_format("webp"), None);
    }

    #[test]
    fn test_webp_is_the_only_unmapped_extension() {
        assert_eq!(FormatPolicy::default().unmapped_extensions(), vec!["webp"]);
    }

    #[test]
    fn test_content_type() {
        assert_eq!(OutputFormat::Jpeg.content_type(), "image/jpeg");
        assert_eq!(OutputFormat::Png.content_type(), "image/png");
        assert_eq!(OutputFormat::Gif.content_type(), "image/gif");
        for format in [OutputFormat::Jpeg, OutputFormat::Png, OutputFormat::Gif] {
            assert_eq!(format.content_type(), format!("image/{}", format));
        }
    }
}
