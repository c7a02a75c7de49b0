//! Asset error types.

/// Errors surfaced while resolving or decoding assets.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The backing file could not be read.
    #[error("failed to read asset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a decodable image.
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    /// No asset is registered or present under the requested name.
    #[error("no texture named {0}")]
    MissingTexture(String),

    /// A frame sequence resolved to zero frames.
    #[error("texture set {0} has no frames")]
    EmptySequence(String),
}
