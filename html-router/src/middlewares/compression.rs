use tower_http::compression::CompressionLayer;

/// Compresses rendered pages, picking gzip, br, deflate or zstd from the
/// request's `Accept-Encoding`.
pub fn compression_layer() -> CompressionLayer {
    CompressionLayer::new().gzip(true).br(true).deflate(true).zstd(true)
}
