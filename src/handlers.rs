use axum::{
    Form,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::errors::WikiError;
use crate::types::{AppState, Page, RenderablePage};

pub const HOME_TITLE: &str = "Home";

/// Form posted by the edit page
#[derive(Debug, Default, Deserialize)]
pub struct SaveForm {
    #[serde(default)]
    pub body: String,
}

/// Handle root path requests
pub async fn index() -> Response {
    found(&format!("/view/{HOME_TITLE}"))
}

/// Paths outside the route table
pub async fn not_found() -> WikiError {
    WikiError::RouteNotFound
}

/// Render a page with bracket links resolved, or send the reader to the
/// editor when the page cannot be loaded.
pub async fn view(state: AppState, _req: Request, title: String) -> Response {
    log::info!("View request for '{}'", title);
    match state.store.load(&title).await {
        Ok(mut page) => {
            page.body = state.links.generate_links(&page.body);
            render(&state, "view", &page)
        }
        Err(e) => {
            if !e.is_not_found() {
                log::warn!("Loading '{}' failed, offering editor instead: {}", title, e);
            }
            found(&format!("/edit/{title}"))
        }
    }
}

/// Render the edit form. A page that cannot be loaded starts out empty.
pub async fn edit(state: AppState, _req: Request, title: String) -> Response {
    log::info!("Edit request for '{}'", title);
    let page = match state.store.load(&title).await {
        Ok(page) => page,
        Err(e) => {
            if !e.is_not_found() {
                log::warn!("Loading '{}' failed, editing empty page: {}", title, e);
            }
            Page::empty(&title)
        }
    };
    render(&state, "edit", &page)
}

/// Persist the posted body and redirect to the page
pub async fn save(state: AppState, req: Request, title: String) -> Response {
    log::info!("Save request for '{}'", title);
    let Form(form) = match Form::<SaveForm>::from_request(req, &state).await {
        Ok(form) => form,
        Err(rejection) => {
            log::warn!("Rejected save form for '{}': {}", title, rejection);
            return rejection.into_response();
        }
    };

    let mut page = Page::new(&title, form.body);
    if let Err(e) = state.store.save(&mut page).await {
        return e.into_response();
    }
    found(&format!("/view/{title}"))
}

fn render(state: &AppState, template: &str, page: &Page) -> Response {
    match state.templates.render(template, &RenderablePage::from_page(page)) {
        Ok(html) => Html(html).into_response(),
        Err(e) => e.into_response(),
    }
}

/// 302 Found, matching what browsers expect after a form post
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(axum::http::header::LOCATION, location.to_string())]).into_response()
}
