//! Bracket Wiki - a minimal wiki server
//!
//! Pages are plain-text files keyed by title, edited and viewed over HTTP.
//! `[Title]` tokens in a page body become links to other pages when viewed.

pub mod components;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod router;
pub mod services;
pub mod types;
pub mod utils;

use std::sync::Arc;

pub use components::TemplateSet;
pub use config::Config;
pub use errors::WikiError;
pub use router::{Operation, PathValidator, build_router, make_handler};
pub use services::{LinkRewriter, PageStore};
pub use types::{AppState, Page, RenderablePage};

impl AppState {
    /// Compile patterns, load templates and prepare the page store.
    /// Everything built here is read-only for the life of the process.
    pub async fn from_config(config: &Config) -> Result<Self, WikiError> {
        let links = LinkRewriter::new()?;
        let templates = TemplateSet::load(&config.template_dir, links.clone())?;
        let store = PageStore::new(Arc::clone(&config.data_dir));
        store.ensure_data_dir().await?;

        Ok(Self {
            store,
            templates: Arc::new(templates),
            validator: Arc::new(PathValidator::new()?),
            links,
            static_dir: Arc::clone(&config.static_dir),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn state_from_config_loads_templates_and_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let config = Config::with_custom(
            Some(data_dir.clone()),
            Some(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tmpl")),
            None,
            None,
            None,
        );

        let state = AppState::from_config(&config).await.unwrap();
        assert!(data_dir.is_dir());
        assert!(state.templates.contains("view"));
        assert!(state.templates.contains("edit"));
    }

    #[tokio::test]
    async fn state_from_config_fails_without_templates() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_custom(
            Some(dir.path().join("data")),
            Some(dir.path().join("no-templates")),
            None,
            None,
            None,
        );
        let err = AppState::from_config(&config).await.err().unwrap();
        assert!(matches!(err, WikiError::Template(_)));
    }
}
