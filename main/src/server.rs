use std::sync::Arc;

use axum::Router;
use common::{
    error::AppError,
    utils::config::{get_config, AppConfig},
};
use html_router::{html_routes, html_state::HtmlState};
use image_search::PexelsClient;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();

    // Get config
    let config = get_config().map_err(AppError::from)?;

    let app = build_app(&config)?;

    info!("Starting server listening on 0.0.0.0:{}", config.http_port);
    let serve_address = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(serve_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Wires the search client and templates into the HTML router.
fn build_app(config: &AppConfig) -> Result<Router, AppError> {
    let image_search = Arc::new(PexelsClient::from_config(config)?);
    info!(base_url = %config.pexels_base_url, "Image search client initialized");

    let html_state = HtmlState::new_with_resources(image_search);

    Ok(html_routes(&html_state).with_state(html_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        routing::get,
        Json,
    };
    use serde_json::json;
    use tokio::net::TcpListener;
    use tower::ServiceExt;

    /// Serves a canned Pexels search response on a random local port.
    async fn spawn_fake_pexels(status: StatusCode) -> String {
        let upstream = Router::new().route(
            "/v1/search",
            get(move || async move {
                (
                    status,
                    Json(json!({
                        "page": 1,
                        "per_page": 15,
                        "photos": [{
                            "id": 1,
                            "url": "https://p/1",
                            "photographer": "Jane",
                            "src": { "original": "https://p/1o", "tiny": "https://p/1t" },
                        }],
                    })),
                )
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake pexels");
        let addr = listener.local_addr().expect("fake pexels address");
        tokio::spawn(async move {
            axum::serve(listener, upstream).await.ok();
        });

        format!("http://{addr}/v1")
    }

    fn test_config(base_url: String) -> AppConfig {
        AppConfig {
            pexels_api_key: "test-key".into(),
            pexels_base_url: base_url,
            http_port: 0,
            ..Default::default()
        }
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        String::from_utf8_lossy(&bytes).replace("&#x2f;", "/")
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn search_for_cats_renders_one_image() {
        let base_url = spawn_fake_pexels(StatusCode::OK).await;
        let app = build_app(&test_config(base_url)).expect("app builds");

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("query=cats"))
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert_eq!(body.matches(r#"class="image-result""#).count(), 1);
        assert!(body.contains(r#"href="https://p/1""#));
        assert!(body.contains(r#"src="https://p/1t""#));
        assert!(body.contains("Jane"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn get_shows_empty_form() {
        let base_url = spawn_fake_pexels(StatusCode::OK).await;
        let app = build_app(&test_config(base_url)).expect("app builds");

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("No images to show yet."));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn rejected_credentials_surface_as_bad_gateway() {
        let base_url = spawn_fake_pexels(StatusCode::UNAUTHORIZED).await;
        let app = build_app(&test_config(base_url)).expect("app builds");

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("query=cats"))
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn invalid_base_url_fails_startup() {
        let result = build_app(&test_config("::not a url::".into()));
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
