pub mod image_record;
pub mod pexels;
pub mod query;

use async_trait::async_trait;
use common::error::AppError;

pub use image_record::ImageRecord;
pub use pexels::PexelsClient;
pub use query::Query;

/// Anything that can turn a validated query into displayable image results.
#[async_trait]
pub trait ImageSearchProvider: Send + Sync {
    /// Runs one search. Results keep the order the backend returned them in.
    async fn search(&self, query: &Query) -> Result<Vec<ImageRecord>, AppError>;
}
