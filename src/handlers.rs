use axum::{
    extract::{rejection::FormRejection, FromRequest, Multipart, Request, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use log::{error, info, warn};
use serde::Deserialize;

use crate::components::TemplateContext;
use crate::types::{Action, AppState, Page, FRONT_PAGE};
use crate::utils::{decode_path, decode_title, encode_title, escape_html};

/// Submitted edit form
#[derive(Debug, Default, Deserialize)]
pub struct SaveForm {
    #[serde(default)]
    pub body: String,
}

/// Handle `/` by showing the front page
pub async fn handle_root(State(state): State<AppState>) -> Response {
    info!("Root request, showing '{}'", FRONT_PAGE);
    view(&state, FRONT_PAGE)
}

/// Handle every other path: route it, then run the matching action
pub async fn handle_action(State(state): State<AppState>, request: Request) -> Response {
    let path = decode_path(request.uri().path());
    let (action, title) = match state.router.route(&path) {
        Ok(route) => route,
        Err(e) => {
            warn!("Path not found: '{}'", path);
            return e.into_response();
        }
    };
    info!("{} request for '{}'", action.as_str(), title);

    match action {
        Action::View => view(&state, &title),
        Action::Edit => edit(&state, &title),
        Action::Save => {
            let body = match read_body(request, &state).await {
                Ok(body) => body,
                Err(response) => {
                    warn!("Unreadable submission for '{}', page left unchanged", title);
                    return response;
                }
            };
            save(&state, &title, body)
        }
    }
}

/// Read the `body` field of a save submission, url-encoded or multipart.
///
/// A missing field, or a request that is not a form at all, reads as an
/// empty body. A form that cannot be parsed is an error response.
async fn read_body(request: Request, state: &AppState) -> Result<String, Response> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.to_ascii_lowercase().starts_with("multipart/form-data"));

    if is_multipart {
        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(IntoResponse::into_response)?;
        while let Some(field) = multipart.next_field().await.map_err(IntoResponse::into_response)? {
            if field.name() == Some("body") {
                return field.text().await.map_err(IntoResponse::into_response);
            }
        }
        return Ok(String::new());
    }

    match Form::<SaveForm>::from_request(request, state).await {
        Ok(Form(form)) => Ok(form.body),
        Err(FormRejection::InvalidFormContentType(_)) => Ok(String::new()),
        Err(rejection) => Err(rejection.into_response()),
    }
}

/// Show a page, or send the client to its edit form when it cannot be loaded
pub fn view(state: &AppState, title: &str) -> Response {
    let page = match state.store.load(title) {
        Ok(page) => page,
        Err(e) => {
            if !e.is_not_found() {
                warn!("Loading '{}' failed ({}), offering edit form", title, e);
            }
            return found(Action::View, Action::Edit, title);
        }
    };

    let escaped = escape_html(&page.text());
    let linked = state.links.rewrite(escaped.as_bytes()).into_owned();
    let shown = Page { body: linked, ..page };
    render(state, "view", &TemplateContext::for_view(&shown))
}

/// Show the edit form, blank when the page does not exist yet
pub fn edit(state: &AppState, title: &str) -> Response {
    let page = state.store.load(title).unwrap_or_else(|e| {
        if !e.is_not_found() {
            warn!("Loading '{}' failed ({}), editing a blank page", title, e);
        }
        Page::empty(decode_title(title))
    });
    render(state, "edit", &TemplateContext::for_edit(&page))
}

/// Store the submitted body and go back to viewing the page
pub fn save(state: &AppState, title: &str, body: String) -> Response {
    let page = Page::new(title, body);
    match state.store.save(&page) {
        Ok(()) => found(Action::Save, Action::View, title),
        Err(e) => {
            error!("Saving '{}' failed: {}", title, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

fn render(state: &AppState, template: &str, context: &TemplateContext) -> Response {
    match state.templates.render(template, context) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Rendering '{}' for '{}' failed: {}", template, context.title, e);
            e.into_response()
        }
    }
}

/// 302 redirect to `/<to>/<title>`
fn found(from: Action, to: Action, title: &str) -> Response {
    let location = format!("/{}/{}", to.as_str(), encode_title(title));
    info!("Redirecting {} '{}' to {}", from.as_str(), title, location);
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
