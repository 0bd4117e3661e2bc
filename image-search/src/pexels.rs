use async_trait::async_trait;
use common::{
    error::{AppError, UpstreamError},
    utils::config::AppConfig,
};
use config::ConfigError;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::{ImageRecord, ImageSearchProvider, Query};

/// Client for the Pexels photo search endpoint.
///
/// One instance is built at startup and shared; the inner `reqwest::Client`
/// pools connections across requests.
#[derive(Clone)]
pub struct PexelsClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
    per_page: Option<u32>,
}

#[derive(Deserialize)]
struct SearchResponse {
    photos: Vec<Photo>,
}

#[derive(Deserialize)]
struct Photo {
    url: String,
    photographer: String,
    src: PhotoSources,
}

#[derive(Deserialize)]
struct PhotoSources {
    tiny: String,
}

impl PexelsClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        per_page: Option<u32>,
    ) -> Result<Self, AppError> {
        let endpoint = Url::parse(&format!("{}/search", base_url.trim_end_matches('/')))
            .map_err(|e| {
                AppError::Config(ConfigError::Message(format!(
                    "Invalid image search base URL '{base_url}': {e}"
                )))
            })?;

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
            api_key: api_key.into(),
            per_page,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Self::new(
            config.pexels_api_key.clone(),
            &config.pexels_base_url,
            config.pexels_per_page,
        )
    }

    async fn fetch(&self, query: &Query) -> Result<Vec<ImageRecord>, UpstreamError> {
        let mut request = self
            .http
            .get(self.endpoint.clone())
            .header(AUTHORIZATION, self.api_key.as_str())
            .query(&[("query", query.as_str())]);
        if let Some(per_page) = self.per_page {
            request = request.query(&[("per_page", per_page)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, query = %query, "Image search returned a failure status");
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "Image search response received");

        parse_search_response(&body)
    }
}

#[async_trait]
impl ImageSearchProvider for PexelsClient {
    async fn search(&self, query: &Query) -> Result<Vec<ImageRecord>, AppError> {
        let records = self.fetch(query).await?;
        info!(query = %query, results = records.len(), "Image search completed");
        Ok(records)
    }
}

/// Maps a search response body into records, preserving photo order.
fn parse_search_response(body: &[u8]) -> Result<Vec<ImageRecord>, UpstreamError> {
    let response: SearchResponse =
        serde_json::from_slice(body).map_err(|e| UpstreamError::Schema(e.to_string()))?;

    response
        .photos
        .into_iter()
        .map(|photo| {
            ensure_len("url", &photo.url, ImageRecord::MAX_URL_LEN)?;
            ensure_len("src.tiny", &photo.src.tiny, ImageRecord::MAX_URL_LEN)?;
            ensure_len(
                "photographer",
                &photo.photographer,
                ImageRecord::MAX_PHOTOGRAPHER_LEN,
            )?;
            Ok(ImageRecord::new(photo.url, photo.src.tiny, photo.photographer))
        })
        .collect()
}

fn ensure_len(field: &str, value: &str, max: usize) -> Result<(), UpstreamError> {
    let length = value.chars().count();
    if length > max {
        return Err(UpstreamError::Schema(format!(
            "field `{field}` is {length} characters long, limit is {max}"
        )));
    }
    Ok(())
}
