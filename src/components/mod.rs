pub mod templates;

pub use templates::{TEMPLATE_NAMES, TemplateSet};
