//! Output formats for log-entry markup.

mod html;

pub use html::{HtmlOptions, as_html};
