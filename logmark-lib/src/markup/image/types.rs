//! Type definitions for embedded-image processing.

/// Token shapes exchanged with the markdown parser's inline stream.
///
/// These mirror the three token kinds the sized-image transform consumes and
/// produces: an image reference, plain text, and an opaque HTML fragment that
/// the renderer passes through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Image markup node, e.g. `![alt](src)`.
    Image(ImageRef),
    /// Plain text content.
    Text(String),
    /// Raw HTML emitted verbatim by the renderer.
    HtmlTag(String),
}

impl Token {
    /// Returns the textual content of a `Text` or `HtmlTag` token.
    pub fn content(&self) -> Option<&str> {
        match self {
            Token::Text(content) | Token::HtmlTag(content) => Some(content),
            Token::Image(_) => None,
        }
    }
}

/// An image reference extracted from inline markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// The image URL as written in the markup.
    pub src: String,
    /// The alt text, possibly empty.
    pub alt: String,
}

impl ImageRef {
    /// Creates an image reference from its source URL and alt text.
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }
}

/// Result of matching a text fragment against the size-directive grammar.
///
/// A directive like `{width=100 height=100}` must sit at the very start of
/// the fragment. `size` holds the inner `width=.. height=..` text exactly as
/// written (original casing, original attribute order); `trailing` holds
/// everything after the closing brace. When no directive is present, `size`
/// is `None` and `trailing` is the full input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeDefinition {
    /// The matched directive body, e.g. `width=100 height=100`.
    pub size: Option<String>,
    /// Text trailing the directive (the whole input when nothing matched).
    pub trailing: String,
}

impl SizeDefinition {
    /// Returns `true` if a size directive was actually matched.
    pub fn has_size(&self) -> bool {
        self.size.is_some()
    }
}

/// Options for the sized-image transform, captured at construction time.
///
/// ## Examples
///
/// ```
/// use logmark_lib::markup::image::ImageOptions;
///
/// let options = ImageOptions {
///     url_prefix: "https://logbook.example.org/".to_string(),
/// };
/// assert!(options.url_prefix.ends_with('/'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageOptions {
    /// Prefix prepended verbatim to every rendered image `src`.
    ///
    /// Covers deployments where markup stores relative attachment paths but
    /// serving requires absolute URLs. Defaults to the empty string.
    pub url_prefix: String,
}

impl ImageOptions {
    /// Creates options with the given URL prefix.
    pub fn with_url_prefix(url_prefix: impl Into<String>) -> Self {
        Self {
            url_prefix: url_prefix.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_content() {
        assert_eq!(Token::Text("abc".to_string()).content(), Some("abc"));
        assert_eq!(
            Token::HtmlTag("<img>".to_string()).content(),
            Some("<img>")
        );
        assert_eq!(Token::Image(ImageRef::new("u", "a")).content(), None);
    }

    #[test]
    fn test_size_definition_has_size() {
        let with = SizeDefinition {
            size: Some("width=1 height=1".to_string()),
            trailing: String::new(),
        };
        let without = SizeDefinition {
            size: None,
            trailing: "text".to_string(),
        };
        assert!(with.has_size());
        assert!(!without.has_size());
    }

    #[test]
    fn test_image_options_default_prefix_is_empty() {
        assert_eq!(ImageOptions::default().url_prefix, "");
    }

    #[test]
    fn test_image_options_with_url_prefix() {
        let options = ImageOptions::with_url_prefix("http://foo.com/bar/");
        assert_eq!(options.url_prefix, "http://foo.com/bar/");
    }
}
