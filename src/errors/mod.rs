use std::io;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Error types for the wiki application
#[derive(Debug, Error)]
pub enum WikiError {
    /// Request path matched no route, or carried an invalid title.
    #[error("404 page not found")]
    RouteNotFound,

    /// No page file exists for the title.
    #[error("page not found: {0}")]
    PageNotFound(String),

    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("template error: {0}")]
    Template(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl WikiError {
    /// True for failures that mean "there is no such page".
    pub fn is_not_found(&self) -> bool {
        match self {
            WikiError::PageNotFound(_) => true,
            WikiError::Io(e) => e.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            WikiError::RouteNotFound | WikiError::PageNotFound(_) => StatusCode::NOT_FOUND,
            WikiError::Io(_) | WikiError::Template(_) | WikiError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}
