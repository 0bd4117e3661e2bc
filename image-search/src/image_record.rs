use serde::Serialize;

/// One displayable search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    url: String,
    preview_url: String,
    photographer: String,
}

impl ImageRecord {
    pub const MAX_URL_LEN: usize = 2048;
    pub const MAX_PHOTOGRAPHER_LEN: usize = 255;

    pub fn new(
        url: impl Into<String>,
        preview_url: impl Into<String>,
        photographer: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            preview_url: preview_url.into(),
            photographer: photographer.into(),
        }
    }

    /// Link to the full image page.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Link to the thumbnail.
    pub fn preview_url(&self) -> &str {
        &self.preview_url
    }

    pub fn photographer(&self) -> &str {
        &self.photographer
    }
}
