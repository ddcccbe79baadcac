use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;

use super::types::Page;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),
    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),
}

const PARTIALS: [(&str, &str); 2] = [
    ("header", include_str!("../../templates/header.hbs")),
    ("footer", include_str!("../../templates/footer.hbs")),
];

/// Renders the HTML pages. Templates are compiled into the binary.
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    /// Register the shared partials and every page template.
    pub fn new() -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();

        for (name, source) in PARTIALS {
            handlebars.register_partial(name, source)?;
        }
        for page in Page::ALL {
            handlebars.register_template_string(page.name(), page.source())?;
        }

        Ok(Self { handlebars })
    }

    /// Render a page with the given context.
    pub fn render<T: Serialize>(&self, page: Page, context: &T) -> Result<String, TemplateError> {
        self.handlebars
            .render(page.name(), context)
            .map_err(TemplateError::from)
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
