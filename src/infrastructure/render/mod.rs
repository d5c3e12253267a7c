//! Document Renderers

mod html;

pub use html::{escape_html, HtmlRenderer};
