use axum::{
    extract::{rejection::FormRejection, State},
    response::IntoResponse,
    Form,
};
use axum_htmx::HxRequest;
use common::error::ValidationError;
use image_search::{ImageRecord, Query};
use serde::Serialize;
use tracing::debug;

use crate::{
    html_state::HtmlState,
    middlewares::response_middleware::{HtmlError, TemplateResponse},
};

const SEARCH_TEMPLATE: &str = "search/base.html";
const SEARCH_AREA_BLOCK: &str = "search_area";

/// Submitted search form fields.
#[derive(Debug, Default)]
pub struct SearchForm {
    query: Option<String>,
}

impl SearchForm {
    pub fn validate(&self) -> Result<Query, ValidationError> {
        self.query
            .as_deref()
            .map_or(Err(ValidationError::Missing), Query::parse)
    }
}

/// Collects raw form pairs. A repeated `query` keeps its last value.
impl FromIterator<(String, String)> for SearchForm {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let query = pairs
            .into_iter()
            .filter(|(name, _)| name == "query")
            .map(|(_, value)| value)
            .last();
        Self { query }
    }
}

#[derive(Serialize)]
struct SearchPageData {
    query: String,
    error: Option<String>,
    images: Vec<ImageRecord>,
}

impl SearchPageData {
    fn empty() -> Self {
        Self {
            query: String::new(),
            error: None,
            images: Vec::new(),
        }
    }
}

pub async fn show_search_form() -> impl IntoResponse {
    TemplateResponse::new_template(SEARCH_TEMPLATE, SearchPageData::empty())
}

pub async fn submit_search(
    State(state): State<HtmlState>,
    HxRequest(is_htmx): HxRequest,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<impl IntoResponse, HtmlError> {
    let form = match form {
        Ok(Form(pairs)) => pairs.into_iter().collect(),
        Err(rejection) => {
            debug!(error = %rejection, "Unreadable search form body");
            SearchForm::default()
        }
    };

    let page = match form.validate() {
        Ok(query) => {
            let images = state.image_search.search(&query).await?;
            SearchPageData {
                query: query.to_string(),
                error: None,
                images,
            }
        }
        Err(err) => {
            debug!(error = %err, "Search form rejected");
            SearchPageData {
                query: form.query.unwrap_or_default(),
                error: Some(err.to_string()),
                ..SearchPageData::empty()
            }
        }
    };

    if is_htmx {
        Ok(TemplateResponse::new_partial(
            SEARCH_TEMPLATE,
            SEARCH_AREA_BLOCK,
            page,
        ))
    } else {
        Ok(TemplateResponse::new_template(SEARCH_TEMPLATE, page))
    }
}
