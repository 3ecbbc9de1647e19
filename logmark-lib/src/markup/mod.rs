//! Log-entry markup manipulation.
//!
//! This module provides a [`Markup`] struct representing the raw markdown
//! body of a log entry. It supports:
//!
//! - Rendering to HTML with sized-image support
//! - In-place removal of embedded-image attachment references
//! - Loading from strings and files
//!
//! ## Examples
//!
//! ```
//! use logmark_lib::markup::Markup;
//! use logmark_lib::markup::output::HtmlOptions;
//!
//! let mut markup: Markup = "Run 42 ![plot](attachment/9){width=80 height=60}".into();
//! let html = markup.to_html(&HtmlOptions::default());
//! assert!(html.contains("width=80 height=60"));
//!
//! markup.remove_embedded_image("9");
//! assert_eq!(markup.content(), "Run 42 ");
//! ```

pub mod image;
pub mod output;
pub mod remove;
mod types;

pub use types::{MarkupError, MarkupResult};

use std::path::Path;

/// The raw markdown body of a log entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    content: String,
}

impl Markup {
    /// Creates a markup document from its raw content.
    pub fn new(content: String) -> Self {
        Self { content }
    }

    /// Returns a reference to the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns a mutable reference to the raw content.
    pub fn content_mut(&mut self) -> &mut String {
        &mut self.content
    }

    /// Returns `true` if the content contains image markup.
    pub fn contains_image(&self) -> bool {
        image::match_image(&self.content).is_some()
    }

    /// Renders the markup to HTML.
    pub fn to_html(&self, options: &output::HtmlOptions) -> String {
        output::as_html(self, options)
    }

    /// Removes the embedded-image construct referencing `id`, in place.
    ///
    /// Returns `true` if a construct was found and deleted. The content is
    /// left untouched when the id is absent or not wrapped in a recognizable
    /// construct.
    ///
    /// ## Examples
    ///
    /// ```
    /// use logmark_lib::markup::Markup;
    ///
    /// let mut markup: Markup = "![](attachment/1){width=2 height=2}".into();
    /// assert!(markup.remove_embedded_image("1"));
    /// assert_eq!(markup.content(), "");
    /// assert!(!markup.remove_embedded_image("1"));
    /// ```
    pub fn remove_embedded_image(&mut self, id: &str) -> bool {
        match remove::find_embedded_image(&self.content, id) {
            remove::EmbeddedImage::Found(span) => {
                self.content.replace_range(span, "");
                true
            }
            remove::EmbeddedImage::NotFound | remove::EmbeddedImage::Malformed => false,
        }
    }
}

impl From<String> for Markup {
    fn from(content: String) -> Self {
        Self::new(content)
    }
}

impl From<&str> for Markup {
    fn from(content: &str) -> Self {
        Self::new(content.to_string())
    }
}

impl TryFrom<&Path> for Markup {
    type Error = MarkupError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(content.into())
    }
}
