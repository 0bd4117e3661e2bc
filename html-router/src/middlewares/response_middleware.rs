use axum::{
    extract::{Request, State},
    http::{HeaderName, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Response},
    Extension,
};
use axum_htmx::{HxRequest, HX_TRIGGER};
use common::error::AppError;
use minijinja::{context, Value};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::template_engine::ProvidesTemplateEngine;

#[derive(Clone, Debug)]
pub enum TemplateKind {
    Full(String),
    Partial(String, String),
    Error(StatusCode),
}

/// What a handler wants rendered. The handler returns it as a response
/// extension and [`with_template_response`] does the rendering.
#[derive(Clone)]
pub struct TemplateResponse {
    template_kind: TemplateKind,
    context: Value,
}

impl TemplateResponse {
    pub fn new_template<T: Serialize>(name: impl Into<String>, context: T) -> Self {
        Self {
            template_kind: TemplateKind::Full(name.into()),
            context: Value::from_serialize(&context),
        }
    }

    pub fn new_partial<T: Serialize>(
        template: impl Into<String>,
        block: impl Into<String>,
        context: T,
    ) -> Self {
        Self {
            template_kind: TemplateKind::Partial(template.into(), block.into()),
            context: Value::from_serialize(&context),
        }
    }

    pub fn error(status: StatusCode, title: &str, description: &str) -> Self {
        let ctx = context! {
            status_code => status.as_u16(),
            title => title,
            description => description
        };
        Self {
            template_kind: TemplateKind::Error(status),
            context: ctx,
        }
    }

    pub fn server_error() -> Self {
        Self::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            "Something went wrong on our end.",
        )
    }

    pub fn bad_gateway() -> Self {
        Self::error(
            StatusCode::BAD_GATEWAY,
            "Image search unavailable",
            "The image search service could not be reached or returned an error. Please try again later.",
        )
    }

    pub fn bad_request(message: &str) -> Self {
        Self::error(StatusCode::BAD_REQUEST, "Bad Request", message)
    }
}

impl IntoResponse for TemplateResponse {
    fn into_response(self) -> Response {
        Extension(self).into_response()
    }
}

// Headers to forward from the handler's response onto the rendered one
const HTMX_HEADERS_TO_FORWARD: &[&str] = &["HX-Push", "HX-Trigger", "HX-Redirect"];

fn forward_headers(from: &axum::http::HeaderMap, to: &mut axum::http::HeaderMap) {
    for &header_name in HTMX_HEADERS_TO_FORWARD {
        if let Ok(name) = HeaderName::from_bytes(header_name.as_bytes()) {
            if let Some(value) = from.get(&name) {
                to.insert(name.clone(), value.clone());
            }
        }
    }
}

fn context_str(context: &Value, key: &str, fallback: &str) -> String {
    context
        .get_attr(key)
        .ok()
        .and_then(|v| v.as_str().map(String::from))
        .unwrap_or_else(|| fallback.to_string())
}

pub async fn with_template_response<S>(
    State(state): State<S>,
    HxRequest(is_htmx): HxRequest,
    req: Request,
    next: Next,
) -> Response
where
    S: ProvidesTemplateEngine + Clone + Send + Sync + 'static,
{
    let response = next.run(req).await;

    let Some(template_response) = response.extensions().get::<TemplateResponse>().cloned() else {
        return response;
    };
    let template_engine = state.template_engine();
    let context = &template_response.context;

    match &template_response.template_kind {
        TemplateKind::Full(name) => match template_engine.render(name, context) {
            Ok(html) => {
                let mut final_response = Html(html).into_response();
                forward_headers(response.headers(), final_response.headers_mut());
                final_response
            }
            Err(e) => {
                error!("Failed to render template '{}': {:?}", name, e);
                (StatusCode::INTERNAL_SERVER_ERROR, Html(fallback_error())).into_response()
            }
        },
        TemplateKind::Partial(template, block) => {
            match template_engine.render_block(template, block, context) {
                Ok(html) => {
                    let mut final_response = Html(html).into_response();
                    forward_headers(response.headers(), final_response.headers_mut());
                    final_response
                }
                Err(e) => {
                    error!("Failed to render block '{}/{}': {:?}", template, block, e);
                    (StatusCode::INTERNAL_SERVER_ERROR, Html(fallback_error())).into_response()
                }
            }
        }
        TemplateKind::Error(status) => {
            if is_htmx {
                // htmx swaps nothing on 204; the page shows the toast instead
                let title = context_str(context, "title", "Error");
                let description = context_str(context, "description", "An error occurred.");

                let trigger_payload =
                    json!({"toast": {"title": title, "description": description, "type": "error"}});
                let trigger_value = serde_json::to_string(&trigger_payload).unwrap_or_else(|e| {
                    error!("Failed to serialize HX-Trigger payload: {}", e);
                    r#"{"toast":{"title":"Error","description":"An unexpected error occurred.","type":"error"}}"#
                        .to_string()
                });
                (StatusCode::NO_CONTENT, [(HX_TRIGGER, trigger_value)], "").into_response()
            } else {
                match template_engine.render("errors/error.html", context) {
                    Ok(html) => (*status, Html(html)).into_response(),
                    Err(e) => {
                        error!("Critical: Failed to render 'errors/error.html': {:?}", e);
                        (*status, Html(fallback_error())).into_response()
                    }
                }
            }
        }
    }
}

#[derive(Debug)]
pub enum HtmlError {
    AppError(AppError),
}

impl From<AppError> for HtmlError {
    fn from(err: AppError) -> Self {
        Self::AppError(err)
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        match self {
            Self::AppError(err) => match err {
                AppError::Upstream(upstream) => {
                    error!("Image search failed: {}", upstream);
                    TemplateResponse::bad_gateway().into_response()
                }
                AppError::Validation(msg) => TemplateResponse::bad_request(&msg).into_response(),
                _ => {
                    error!("Internal error: {:?}", err);
                    TemplateResponse::server_error().into_response()
                }
            },
        }
    }
}

fn fallback_error() -> String {
    r#"
    <html>
        <body>
            <main>
                <h1>Error</h1>
                <p>Sorry, something went wrong displaying this page.</p>
            </main>
        </body>
    </html>
    "#
    .to_string()
}
