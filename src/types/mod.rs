use std::path::PathBuf;
use std::sync::Arc;

use crate::components::TemplateSet;
use crate::router::PathValidator;
use crate::services::{LinkRewriter, PageStore};

/// Application state shared across all handlers.
///
/// Built once at startup and never mutated afterwards; every field is cheap
/// to clone and safe for concurrent reads.
#[derive(Clone)]
pub struct AppState {
    pub store: PageStore,
    pub templates: Arc<TemplateSet>,
    pub validator: Arc<PathValidator>,
    pub links: LinkRewriter,
    pub static_dir: Arc<PathBuf>,
}

/// A titled text document persisted as one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub body: Vec<u8>,
}

impl Page {
    pub fn new(title: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self { title: title.into(), body: body.into() }
    }

    /// A page with no content yet, offered for editing
    pub fn empty(title: impl Into<String>) -> Self {
        Self { title: title.into(), body: Vec::new() }
    }
}

/// Per-request view of a page handed to a template.
/// `body` is trusted HTML and is inserted without further escaping.
#[derive(Debug, Clone)]
pub struct RenderablePage {
    pub title: String,
    pub body: String,
}

impl RenderablePage {
    /// Wrap a page whose body is already escaped (and possibly link-rewritten)
    pub fn from_page(page: &Page) -> Self {
        Self {
            title: page.title.clone(),
            body: String::from_utf8_lossy(&page.body).into_owned(),
        }
    }
}
