mod engine;
mod types;

pub use engine::{TemplateEngine, TemplateError};
pub use types::{
    EditPageContext, ItemContext, ListPageContext, LoginPageContext, Page, StatusOption,
    ViewPageContext,
};
