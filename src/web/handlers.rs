use axum::extract::{Form, Query, State};
use axum::http::header::{LOCATION, REFERER, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;
use tracing::{error, info, warn};

use super::forms::{CreateForm, IdQuery, LoginForm, SaveForm};
use super::AppState;
use crate::item::ItemId;
use crate::markdown::render_markdown;
use crate::template::{
    EditPageContext, ItemContext, ListPageContext, LoginPageContext, Page, StatusOption,
    ViewPageContext,
};

/// `302 Found` to `location`.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

fn render_page<T: Serialize>(state: &AppState, page: Page, context: &T) -> Response {
    match state.templates().render(page, context) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(page = page.name(), "Failed to render page: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

/// `GET /`: every item in display order, plus the top item's description.
pub async fn view_all(State(state): State<AppState>) -> Response {
    let items = state.with_store(|store| store.list());
    let description = items
        .first()
        .map(|item| render_markdown(&item.description))
        .unwrap_or_default();
    let context = ListPageContext {
        items: items.iter().map(ItemContext::from).collect(),
        description,
    };
    render_page(&state, Page::ViewAll, &context)
}

/// `GET /view?ID=n`
pub async fn view(State(state): State<AppState>, Query(query): Query<IdQuery>) -> Response {
    let id = query.id();
    let Some(item) = state.with_store(|store| store.get(id)) else {
        return found("/");
    };
    let context = ViewPageContext {
        title: item.name.clone(),
        description: render_markdown(&item.description),
        item: ItemContext::from(&item),
    };
    render_page(&state, Page::View, &context)
}

/// `GET /edit?ID=n`
pub async fn edit(State(state): State<AppState>, Query(query): Query<IdQuery>) -> Response {
    let id = query.id();
    let Some(item) = state.with_store(|store| store.get(id)) else {
        return found("/");
    };
    let context = EditPageContext {
        title: item.name.clone(),
        status_options: StatusOption::all(item.display_status),
        item: ItemContext::from(&item),
    };
    render_page(&state, Page::Edit, &context)
}

/// `POST /save`: apply the edit form, then go back where the user came from.
pub async fn save(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SaveForm>,
) -> Response {
    let id = form.id();
    if id > 0 {
        let update = form.into_update();
        state.with_store(|store| store.update(id, update));
    } else {
        warn!("Save without a valid id ignored");
    }

    let referer = headers.get(REFERER).and_then(|value| value.to_str().ok());
    found(&save_redirect(referer, id))
}

/// After a save from the edit page, show the item; otherwise return to the
/// referring page, or the list when there is none.
fn save_redirect(referer: Option<&str>, id: ItemId) -> String {
    match referer {
        None | Some("") => "/".to_string(),
        Some(r) if r.contains("edit") => format!("/view?ID={id}"),
        Some(r) => r.to_string(),
    }
}

/// `POST /create`
pub async fn create(State(state): State<AppState>, Form(form): Form<CreateForm>) -> Response {
    let name = form.name.trim();
    if !name.is_empty() {
        state.with_store(|store| store.create(name));
    }
    found("/")
}

/// `GET /delete?ID=n`
pub async fn delete(State(state): State<AppState>, Query(query): Query<IdQuery>) -> Response {
    let id = query.id();
    if id > 0 {
        state.with_store(|store| store.delete(id));
    }
    found("/")
}

/// `GET <login_path>`
pub async fn login_page(State(state): State<AppState>) -> Response {
    render_login(&state)
}

fn render_login(state: &AppState) -> Response {
    let context = LoginPageContext {
        title: "Login",
        login_path: state.auth().login_path().to_string(),
    };
    render_page(state, Page::Login, &context)
}

/// `POST <login_path>`
///
/// Every non-empty attempt waits out the login delay. A wrong password gets
/// an empty page.
pub async fn login_submit(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    if form.password.is_empty() {
        return render_login(&state);
    }

    tokio::time::sleep(state.auth().login_delay()).await;

    if state.auth().password_matches(&form.password) {
        info!("Login succeeded");
        (
            StatusCode::FOUND,
            [
                (SET_COOKIE, state.auth().session_cookie()),
                (LOCATION, "/".to_string()),
            ],
        )
            .into_response()
    } else {
        warn!("Login failed");
        StatusCode::OK.into_response()
    }
}

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_redirect_from_edit_page_shows_item() {
        assert_eq!(
            save_redirect(Some("http://localhost:8080/edit?ID=4"), 4),
            "/view?ID=4"
        );
    }

    #[test]
    fn test_save_redirect_returns_to_referer() {
        assert_eq!(save_redirect(Some("http://localhost:8080/"), 4), "http://localhost:8080/");
    }

    #[test]
    fn test_save_redirect_without_referer_goes_home() {
        assert_eq!(save_redirect(None, 4), "/");
        assert_eq!(save_redirect(Some(""), 4), "/");
    }

    #[test]
    fn test_found_sets_location() {
        let response = found("/view?ID=1");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/view?ID=1");
    }
}
