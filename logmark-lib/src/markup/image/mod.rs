//! Sized-image support for embedded attachment images.
//!
//! Log-entry bodies may carry a size directive after an embedded image, as
//! produced by the commonmark image-attributes extension:
//!
//! ```markdown
//! ![diagram](attachment/123456789){width=400 height=300}
//! ```
//!
//! pulldown-cmark parses the image itself but leaves the `{..}` directive as
//! literal text. The [`SizedImageProcessor`] iterator adapter runs after
//! inline parsing and before HTML serialization: it rewrites each image event
//! group (plus the directive at the start of the following text event, when
//! present) into a single raw `<img>` tag carrying `width`/`height`
//! attributes, followed by whatever text trailed the directive.
//!
//! ## Examples
//!
//! ```
//! use pulldown_cmark::Parser;
//! use logmark_lib::markup::image::{ImageOptions, SizedImageProcessor};
//!
//! let markup = "![plot](attachment/42){width=100 height=100}";
//! let parser = Parser::new(markup);
//! let mut html = String::new();
//! let events = SizedImageProcessor::new(parser, ImageOptions::default());
//! pulldown_cmark::html::push_html(&mut html, events);
//! assert!(html.contains(r#"<img src="attachment/42" alt="plot" width=100 height=100>"#));
//! ```
//!
//! ## Design
//!
//! The adapter buffers at most one image group at a time and never aborts on
//! malformed input: a truncated event group degrades to an `<img>` tag
//! without size attributes. Each rewritten image always yields exactly one
//! HTML event followed by one text event (possibly empty), so the number of
//! semantic image references is preserved.

mod types;

pub use types::{ImageOptions, ImageRef, SizeDefinition, Token};

use lazy_static::lazy_static;
use pulldown_cmark::{CowStr, Event, Tag, TagEnd};
use regex::Regex;
use std::collections::VecDeque;
use tracing::debug;

lazy_static! {
    /// Commonmark image markup, non-greedy: `![alt](url)`.
    static ref IMAGE_PATTERN: Regex = Regex::new(r"!\[.*?\]\(.*?\)").unwrap();

    /// Size directive at the start of a text fragment, `width` first.
    /// Values are 1-9 digit unsigned integers; matching is case-insensitive
    /// and the separator is literal whitespace.
    static ref WIDTH_FIRST_PATTERN: Regex =
        Regex::new(r"(?i)^\{(width=[0-9]{1,9}\s+height=[0-9]{1,9})\}").unwrap();

    /// Same directive with `height` before `width`.
    static ref HEIGHT_FIRST_PATTERN: Regex =
        Regex::new(r"(?i)^\{(height=[0-9]{1,9}\s+width=[0-9]{1,9})\}").unwrap();
}

/// Matches a string against commonmark image markup, i.e. `![alt](url)`.
///
/// Returns `None` for empty or non-matching input, otherwise the first match.
///
/// ## Examples
///
/// ```
/// use logmark_lib::markup::image::match_image;
///
/// assert!(match_image("![alt](url)").is_some());
/// assert!(match_image("no image here").is_none());
/// assert!(match_image("").is_none());
/// ```
pub fn match_image(raw: &str) -> Option<regex::Match<'_>> {
    if raw.is_empty() {
        return None;
    }
    IMAGE_PATTERN.find(raw)
}

/// Matches a text fragment against the image size-directive grammar.
///
/// Accepts both attribute orderings (`{width=W height=H}` and
/// `{height=H width=W}`) at the very start of the fragment. Returns `None`
/// for empty input; otherwise a [`SizeDefinition`] whose `size` is the
/// matched directive body (as written) and whose `trailing` is the rest of
/// the fragment: the full input when no directive is present.
///
/// ## Examples
///
/// ```
/// use logmark_lib::markup::image::match_size_definition;
///
/// let def = match_size_definition("{width=100 height=100} extra").unwrap();
/// assert_eq!(def.size.as_deref(), Some("width=100 height=100"));
/// assert_eq!(def.trailing, " extra");
///
/// let def = match_size_definition("just text").unwrap();
/// assert!(def.size.is_none());
/// assert_eq!(def.trailing, "just text");
/// ```
pub fn match_size_definition(text: &str) -> Option<SizeDefinition> {
    if text.is_empty() {
        return None;
    }
    for pattern in [&*WIDTH_FIRST_PATTERN, &*HEIGHT_FIRST_PATTERN] {
        if let Some(captures) = pattern.captures(text) {
            let end = captures.get(0).map(|m| m.end()).unwrap_or(0);
            return Some(SizeDefinition {
                size: Some(captures[1].to_string()),
                trailing: text[end..].to_string(),
            });
        }
    }
    Some(SizeDefinition {
        size: None,
        trailing: text.to_string(),
    })
}

/// Builds the raw `<img>` tag and leftover text for an image reference.
///
/// Attribute values are escaped for the double-quoted attribute context; the
/// size directive is emitted unquoted and lower-cased, preserving the order
/// in which the attributes were written.
fn build_img_tag(
    image: &ImageRef,
    trailing_text: Option<&str>,
    options: &ImageOptions,
) -> (String, String) {
    let mut tag = format!(
        r#"<img src="{}{}" alt="{}""#,
        html_escape::encode_double_quoted_attribute(&options.url_prefix),
        html_escape::encode_double_quoted_attribute(&image.src),
        html_escape::encode_double_quoted_attribute(&image.alt),
    );
    let definition = trailing_text.and_then(match_size_definition);
    if let Some(definition) = &definition
        && let Some(size) = &definition.size
    {
        tag.push(' ');
        tag.push_str(&size.to_lowercase());
    }
    tag.push('>');
    let leftover = definition.map(|d| d.trailing).unwrap_or_default();
    (tag, leftover)
}

/// Processes an image token and the text token following it, if any.
///
/// When the following text starts with a size directive, the directive is
/// folded into the emitted `<img>` tag; any remaining text is returned as a
/// separate text token. Always returns an HTML-tag token followed by a text
/// token, in that order.
///
/// ## Examples
///
/// ```
/// use logmark_lib::markup::image::{process_image, ImageOptions, ImageRef, Token};
///
/// let image = ImageRef::new("attachment/7", "scope trace");
/// let options = ImageOptions::default();
/// let (img, leftover) = process_image(&image, Some("{width=640 height=480} tail"), &options);
/// assert_eq!(
///     img,
///     Token::HtmlTag(r#"<img src="attachment/7" alt="scope trace" width=640 height=480>"#.into())
/// );
/// assert_eq!(leftover, Token::Text(" tail".into()));
/// ```
pub fn process_image(
    image: &ImageRef,
    trailing_text: Option<&str>,
    options: &ImageOptions,
) -> (Token, Token) {
    let (tag, leftover) = build_img_tag(image, trailing_text, options);
    (Token::HtmlTag(tag), Token::Text(leftover))
}

/// Iterator adapter that rewrites image event groups into sized `<img>` tags.
///
/// Wraps a pulldown-cmark event iterator. Each `Start(Image) .. End(Image)`
/// group is consumed together with a size directive at the start of the
/// following text event (when present) and replaced by one
/// `Event::InlineHtml` carrying the `<img>` tag plus one `Event::Text` with
/// the leftover text. All other events pass through unchanged.
pub struct SizedImageProcessor<'a, I>
where
    I: Iterator<Item = Event<'a>>,
{
    inner: I,
    options: ImageOptions,
    pending: VecDeque<Event<'a>>,
}

impl<'a, I> SizedImageProcessor<'a, I>
where
    I: Iterator<Item = Event<'a>>,
{
    /// Creates a new processor over the given event iterator.
    ///
    /// The `options` value is captured here and shared by every image the
    /// processor rewrites; there is no global configuration.
    pub fn new(inner: I, options: ImageOptions) -> Self {
        Self {
            inner,
            options,
            pending: VecDeque::new(),
        }
    }

    /// Consumes events up to the matching `End(Image)`, collecting alt text.
    ///
    /// Nested image groups contribute their text to the alt content. A
    /// truncated stream simply ends the collection early.
    fn collect_image(&mut self, dest_url: CowStr<'a>) -> ImageRef {
        let mut alt = String::new();
        let mut depth = 1usize;
        for event in self.inner.by_ref() {
            match event {
                Event::Start(Tag::Image { .. }) => depth += 1,
                Event::End(TagEnd::Image) => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                Event::Text(text) | Event::Code(text) => alt.push_str(&text),
                Event::SoftBreak | Event::HardBreak => alt.push(' '),
                _ => {}
            }
        }
        ImageRef::new(dest_url.into_string(), alt)
    }

    /// Queues the rewritten image tag and its leftover text event.
    fn push_rewrite(&mut self, image: &ImageRef, trailing_text: Option<&str>) {
        let (tag, leftover) = build_img_tag(image, trailing_text, &self.options);
        debug!(src = %image.src, "rewrote embedded image");
        self.pending.push_back(Event::InlineHtml(tag.into()));
        self.pending.push_back(Event::Text(leftover.into()));
    }
}

impl<'a, I> Iterator for SizedImageProcessor<'a, I>
where
    I: Iterator<Item = Event<'a>>,
{
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }

        match self.inner.next()? {
            Event::Start(Tag::Image { dest_url, .. }) => {
                let image = self.collect_image(dest_url);
                // One event of lookahead: a text event may carry the directive.
                match self.inner.next() {
                    Some(Event::Text(text)) => {
                        self.push_rewrite(&image, Some(text.as_ref()));
                    }
                    other => {
                        self.push_rewrite(&image, None);
                        if let Some(event) = other {
                            self.pending.push_back(event);
                        }
                    }
                }
                self.pending.pop_front()
            }
            other => Some(other),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Rewrites both collapse event groups and emit extra events, so only
        // the pending queue contributes a reliable bound.
        (self.pending.len(), None)
    }
}
