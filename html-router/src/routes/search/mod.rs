mod handlers;

use axum::{extract::FromRef, routing::get, Router};
pub use handlers::{show_search_form, submit_search, SearchForm};

use crate::html_state::HtmlState;

/// The form and its results share one path: GET renders it empty, POST searches.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    HtmlState: FromRef<S>,
{
    Router::new().route("/", get(show_search_form).post(submit_search))
}
