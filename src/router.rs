//! Route table, path validation and the handler adapter.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;

use axum::{
    Router,
    extract::{Request, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use regex::Regex;
use tower_http::services::ServeDir;

use crate::errors::WikiError;
use crate::handlers;
use crate::types::AppState;

const VALID_PATH: &str = r"^/(edit|view|save)/([a-zA-Z0-9]+)$";

/// Longest title accepted by the router. Keeps `{title}.txt` well inside
/// common filename length limits.
pub const MAX_TITLE_LEN: usize = 128;

/// The three title-addressed operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    View,
    Edit,
    Save,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::View => "view",
            Operation::Edit => "edit",
            Operation::Save => "save",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = WikiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Operation::View),
            "edit" => Ok(Operation::Edit),
            "save" => Ok(Operation::Save),
            _ => Err(WikiError::RouteNotFound),
        }
    }
}

/// Validates request paths and extracts `(operation, title)`
#[derive(Debug, Clone)]
pub struct PathValidator {
    pattern: Regex,
}

impl PathValidator {
    pub fn new() -> Result<Self, WikiError> {
        let pattern = Regex::new(VALID_PATH)
            .map_err(|e| WikiError::Config(format!("route pattern: {e}")))?;
        Ok(Self { pattern })
    }

    /// Match the percent-decoded path; undecodable paths are RouteNotFound.
    pub fn validate(&self, path: &str) -> Result<(Operation, String), WikiError> {
        let decoded = urlencoding::decode(path).map_err(|_| WikiError::RouteNotFound)?;
        let caps = self.pattern.captures(&decoded).ok_or(WikiError::RouteNotFound)?;
        let op = caps[1].parse::<Operation>()?;
        let title = &caps[2];
        if title.len() > MAX_TITLE_LEN {
            return Err(WikiError::RouteNotFound);
        }
        Ok((op, title.to_string()))
    }
}

type HandlerFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// Adapt a `(state, request, title)` handler into a plain axum handler.
///
/// The request path is re-validated against the route pattern; a path that
/// does not match produces a 404 and the wrapped handler is never called.
/// The operation named in the path must be `expected`.
pub fn make_handler<F, Fut>(
    expected: Operation,
    handler: F,
) -> impl Fn(State<AppState>, Request) -> HandlerFuture + Clone + Send + Sync + 'static
where
    F: Fn(AppState, Request, String) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    move |State(state): State<AppState>, req: Request| -> HandlerFuture {
        let handler = handler.clone();
        Box::pin(async move {
            match state.validator.validate(req.uri().path()) {
                Ok((op, title)) if op == expected => handler(state, req, title).await,
                Ok((op, _)) => {
                    log::debug!("Route {} reached the {} handler", op, expected);
                    WikiError::RouteNotFound.into_response()
                }
                Err(e) => {
                    log::debug!("Rejected path '{}'", req.uri().path());
                    e.into_response()
                }
            }
        })
    }
}

/// Build the full route table over the shared application state
pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(state.static_dir.as_path());

    Router::new()
        .route("/", get(handlers::index))
        .route("/view/*title", get(make_handler(Operation::View, handlers::view)))
        .route("/edit/*title", get(make_handler(Operation::Edit, handlers::edit)))
        .route("/save/*title", post(make_handler(Operation::Save, handlers::save)))
        .nest_service("/static", static_files)
        .fallback(handlers::not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PathValidator {
        PathValidator::new().unwrap()
    }

    #[test]
    fn extracts_operation_and_title() {
        let v = validator();
        assert_eq!(v.validate("/view/Home").unwrap(), (Operation::View, "Home".to_string()));
        assert_eq!(v.validate("/edit/Page2").unwrap(), (Operation::Edit, "Page2".to_string()));
        assert_eq!(v.validate("/save/ABC123").unwrap(), (Operation::Save, "ABC123".to_string()));
    }

    #[test]
    fn rejects_traversal_and_non_alphanumeric_titles() {
        let v = validator();
        for path in [
            "/view/../etc",
            "/view/..%2Fetc",
            "/view/a/b",
            "/view/my-page",
            "/view/my_page",
            "/view/Home.txt",
            "/view/",
            "/view/Home/",
            "/delete/Home",
            "/VIEW/Home",
            "view/Home",
        ] {
            assert!(
                matches!(v.validate(path), Err(WikiError::RouteNotFound)),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    fn matches_percent_decoded_path() {
        let v = validator();
        assert_eq!(v.validate("/view/%48ome").unwrap(), (Operation::View, "Home".to_string()));
        assert!(matches!(v.validate("/view/%2E%2E%2Fetc"), Err(WikiError::RouteNotFound)));
        assert!(matches!(v.validate("/view/Home%20Page"), Err(WikiError::RouteNotFound)));
        assert!(matches!(v.validate("/view/%FF"), Err(WikiError::RouteNotFound)));
    }

    #[test]
    fn rejects_overlong_titles() {
        let v = validator();
        let ok = format!("/view/{}", "a".repeat(MAX_TITLE_LEN));
        let too_long = format!("/view/{}", "a".repeat(MAX_TITLE_LEN + 1));
        assert!(v.validate(&ok).is_ok());
        assert!(matches!(v.validate(&too_long), Err(WikiError::RouteNotFound)));
    }

    #[test]
    fn operation_round_trips_through_str() {
        for op in [Operation::View, Operation::Edit, Operation::Save] {
            assert_eq!(op.as_str().parse::<Operation>().unwrap(), op);
        }
        assert!("index".parse::<Operation>().is_err());
    }
}
