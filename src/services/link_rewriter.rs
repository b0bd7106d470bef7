use std::sync::Arc;

use regex::bytes::Regex;

use crate::errors::WikiError;

const BRACKET_LINK: &str = r"\[([a-zA-Z0-9]+)\]";
const ANCHOR: &[u8] = br#"<a href="/view/$1">$1</a>"#;

/// Rewrites `[Title]` tokens into links to the view route
#[derive(Clone)]
pub struct LinkRewriter {
    pattern: Arc<Regex>,
}

impl LinkRewriter {
    pub fn new() -> Result<Self, WikiError> {
        let pattern = Regex::new(BRACKET_LINK)
            .map_err(|e| WikiError::Config(format!("bracket link pattern: {e}")))?;
        Ok(Self { pattern: Arc::new(pattern) })
    }

    /// Replace every non-overlapping bracket token with an anchor.
    /// Output is not re-scanned and link targets are not checked.
    pub fn generate_links(&self, body: &[u8]) -> Vec<u8> {
        self.pattern.replace_all(body, ANCHOR).into_owned()
    }

    /// String convenience over [`LinkRewriter::generate_links`]
    pub fn generate_links_str(&self, body: &str) -> String {
        String::from_utf8_lossy(&self.generate_links(body.as_bytes())).into_owned()
    }
}
