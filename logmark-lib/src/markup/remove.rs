//! Removal of embedded-image references from raw markup.
//!
//! When a user deletes an attachment that was embedded in a log-entry body,
//! the corresponding `![..](../<id>..){width=.. height=..}` construct has to be
//! stripped from the raw markup without disturbing the surrounding text.
//! This is plain character scanning, not markdown parsing: the construct
//! boundaries are the last `!` before the identifier and the first `}` after
//! it. That is only sound for constructs the application itself inserted;
//! callers must guarantee the identifier sits inside a well-formed embedded
//! image reference with a trailing size directive.

use std::borrow::Cow;
use std::ops::Range;
use tracing::warn;

/// Location of an embedded-image construct within raw markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbeddedImage {
    /// Byte range of the full `![..](..){..}` construct containing the id.
    Found(Range<usize>),
    /// The id does not occur in the markup.
    NotFound,
    /// The id occurs but is not wrapped in a recognizable construct.
    Malformed,
}

impl EmbeddedImage {
    /// Returns `true` if a removable construct was located.
    pub fn is_found(&self) -> bool {
        matches!(self, EmbeddedImage::Found(_))
    }
}

/// Locates the embedded-image construct containing the first occurrence of
/// `id`.
///
/// The match is a literal, case-sensitive substring search; constructs
/// sharing a textual prefix with `id` but spelled differently are never
/// touched. An empty `id` is treated as absent.
///
/// ## Examples
///
/// ```
/// use logmark_lib::markup::remove::{find_embedded_image, EmbeddedImage};
///
/// let markup = "ABC ![](attachment/123){width=100 height=100} DEF";
/// assert_eq!(find_embedded_image(markup, "123"), EmbeddedImage::Found(4..45));
/// assert_eq!(find_embedded_image(markup, "999"), EmbeddedImage::NotFound);
/// ```
pub fn find_embedded_image(markup: &str, id: &str) -> EmbeddedImage {
    if id.is_empty() {
        return EmbeddedImage::NotFound;
    }
    let Some(index) = markup.find(id) else {
        return EmbeddedImage::NotFound;
    };
    let before = &markup[..index];
    let after = &markup[index + id.len()..];

    let Some(bang) = before.rfind('!') else {
        warn!(id, "embedded-image id not preceded by image markup");
        return EmbeddedImage::Malformed;
    };
    let Some(close) = after.find('}') else {
        warn!(id, "embedded-image id not followed by a size directive");
        return EmbeddedImage::Malformed;
    };

    EmbeddedImage::Found(bang..index + id.len() + close + 1)
}

/// Removes the embedded-image construct referencing `id` from `markup`.
///
/// Deletes everything from the construct's opening `!` through the closing
/// `}` of its size directive, inclusive. Text on either side is preserved
/// exactly: no whitespace normalization is performed. If `id` does not
/// occur, or occurs outside a recognizable construct, the input is returned
/// unchanged (borrowed).
///
/// Only the construct containing the *first* occurrence of `id` is removed;
/// re-applying the function to the result is a no-op.
///
/// ## Examples
///
/// ```
/// use logmark_lib::markup::remove::remove_image_markup;
///
/// let markup = "ABC ![](attachment/123456789){width=100 height=100} DEF";
/// assert_eq!(remove_image_markup(markup, "123456789"), "ABC  DEF");
/// assert_eq!(remove_image_markup("whatever", "123456789"), "whatever");
/// ```
pub fn remove_image_markup<'a>(markup: &'a str, id: &str) -> Cow<'a, str> {
    match find_embedded_image(markup, id) {
        EmbeddedImage::Found(span) => {
            let mut out = String::with_capacity(markup.len() - span.len());
            out.push_str(&markup[..span.start]);
            out.push_str(&markup[span.end..]);
            Cow::Owned(out)
        }
        EmbeddedImage::NotFound | EmbeddedImage::Malformed => Cow::Borrowed(markup),
    }
}
