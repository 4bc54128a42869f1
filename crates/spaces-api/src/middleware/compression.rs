//! Response compression layer.

use tower_http::compression::CompressionLayer;

/// Gzip for clients that ask for it. Relayed file bodies pass through
/// untouched when the client does not send `Accept-Encoding`.
pub fn build_compression_layer() -> CompressionLayer {
    CompressionLayer::new().gzip(true)
}
