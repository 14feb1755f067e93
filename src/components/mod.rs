pub mod templates;

pub use templates::{TemplateContext, TemplateSet};
