//! Browser pages served alongside the API.
//!
//! Both pages are compiled into the binary. The session page reads its
//! token from the URL, renders the menu, and follows live updates over
//! `/ws/{session}`.

use axum::extract::Path;
use axum::response::Html;

const INDEX_HTML: &str = include_str!("../assets/index.html");
const SESSION_HTML: &str = include_str!("../assets/session.html");

/// `GET /` -- landing page that creates a session and redirects into it.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `GET /session/{session}` -- interactive menu page for one session.
pub async fn session_page(Path(_session): Path<String>) -> Html<&'static str> {
    Html(SESSION_HTML)
}
