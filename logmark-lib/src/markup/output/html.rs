//! HTML output for log-entry markup.
//!
//! Parsing is delegated to pulldown-cmark; the only post-processing pass is
//! the sized-image rewrite, which runs between inline parsing and HTML
//! serialization. Serialization itself uses pulldown-cmark's own HTML
//! writer, so everything the parser understands renders as usual and the
//! rewritten `<img>` tags pass through verbatim.

use crate::markup::Markup;
use crate::markup::image::{ImageOptions, SizedImageProcessor, match_image};
use pulldown_cmark::{Options, Parser};

/// Options for HTML output.
///
/// ## Examples
///
/// ```
/// use logmark_lib::markup::output::HtmlOptions;
/// use logmark_lib::markup::image::ImageOptions;
///
/// let options = HtmlOptions {
///     image: ImageOptions::with_url_prefix("https://logbook/"),
/// };
/// assert_eq!(options.image.url_prefix, "https://logbook/");
/// ```
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Options for the sized-image transform (URL prefix).
    pub image: ImageOptions,
}

/// Parser extensions enabled for log-entry bodies.
fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
}

/// Converts log-entry markup to HTML.
///
/// Documents without any image markup skip the sized-image pass entirely;
/// everything else is rendered identically in both paths.
///
/// ## Examples
///
/// ```
/// use logmark_lib::markup::Markup;
/// use logmark_lib::markup::output::{HtmlOptions, as_html};
///
/// let markup: Markup = "![plot](attachment/1){width=100 height=100}".into();
/// let html = as_html(&markup, &HtmlOptions::default());
/// assert!(html.contains("width=100 height=100"));
/// ```
pub fn as_html(markup: &Markup, options: &HtmlOptions) -> String {
    let content = markup.content();
    let mut html = String::with_capacity(content.len() * 3 / 2);
    let parser = Parser::new_ext(content, parser_options());
    if match_image(content).is_some() {
        let events = SizedImageProcessor::new(parser, options.image.clone());
        pulldown_cmark::html::push_html(&mut html, events);
    } else {
        pulldown_cmark::html::push_html(&mut html, parser);
    }
    html
}
