use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between the input string and a file on disk.
#[derive(Error, Debug)]
pub enum QrError {
    #[error("cannot encode an empty string")]
    EmptyInput,

    #[error("failed to encode {len} bytes as a QR code: {source}")]
    Encode {
        len: usize,
        #[source]
        source: qrcode::types::QrError,
    },

    #[error("scale must be at least 1, got {0}")]
    InvalidScale(u32),

    #[error("rendering {modules} modules at scale {scale} exceeds the raster size limit")]
    TooLarge { modules: u32, scale: u32 },

    #[error("cannot infer an output format from {}", path.display())]
    UnknownFormat { path: PathBuf },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, QrError>;
