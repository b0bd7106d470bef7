use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::errors::WikiError;
use crate::types::Page;
use crate::utils::escape_html;

const PAGE_EXTENSION: &str = "txt";

/// Persists pages as `{data_dir}/{title}.txt`.
///
/// Titles are trusted here; the router rejects anything that is not
/// alphanumeric before a title reaches the store. There is no locking:
/// concurrent saves of one title race and the last writer wins.
#[derive(Clone)]
pub struct PageStore {
    data_dir: Arc<PathBuf>,
}

impl PageStore {
    pub fn new(data_dir: Arc<PathBuf>) -> Self {
        debug!("Creating PageStore with data directory: {:?}", data_dir);
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Create the data directory if it does not exist yet
    pub async fn ensure_data_dir(&self) -> Result<(), WikiError> {
        if fs::metadata(self.data_dir.as_path()).await.is_err() {
            info!("Creating data directory {:?}", self.data_dir);
            fs::create_dir_all(self.data_dir.as_path()).await?;
        }
        Ok(())
    }

    pub fn page_path(&self, title: &str) -> PathBuf {
        self.data_dir.join(format!("{title}.{PAGE_EXTENSION}"))
    }

    /// Escape the page body in place and write it, replacing any previous
    /// content. New files are readable and writable by the owner only.
    pub async fn save(&self, page: &mut Page) -> Result<(), WikiError> {
        let path = self.page_path(&page.title);
        let escaped = escape_html(&String::from_utf8_lossy(&page.body));
        page.body = escaped.into_bytes();

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&path).await.map_err(|e| {
            warn!("Failed to open {:?} for writing: {}", path, e);
            WikiError::Io(e)
        })?;
        file.write_all(&page.body).await?;
        file.flush().await?;

        info!("Saved page '{}' ({} bytes)", page.title, page.body.len());
        Ok(())
    }

    /// Read a page fully into memory
    pub async fn load(&self, title: &str) -> Result<Page, WikiError> {
        let path = self.page_path(title);
        match fs::read(&path).await {
            Ok(body) => {
                debug!("Loaded page '{}' ({} bytes)", title, body.len());
                Ok(Page::new(title, body))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No page file at {:?}", path);
                Err(WikiError::PageNotFound(title.to_string()))
            }
            Err(e) => {
                warn!("Failed to read {:?}: {}", path, e);
                Err(WikiError::Io(e))
            }
        }
    }
}
