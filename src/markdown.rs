//! Markdown → HTML for item descriptions.

use pulldown_cmark::{html, Event, Options, Parser};

/// Render a description to HTML with the GitHub-flavoured extensions
/// (tables, strikethrough, task lists, footnotes).
///
/// Raw HTML in the source is escaped and shown as text.
#[must_use]
pub fn render_markdown(source: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;

    let parser = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut html_output = String::with_capacity(source.len().saturating_mul(3) / 2);
    html::push_html(&mut html_output, parser);
    html_output
}
