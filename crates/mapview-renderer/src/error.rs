use thiserror::Error;

use mapview_core::MapError;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Map(#[from] MapError),

    #[error("Invalid render settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("Cannot allocate a {width}x{height} canvas")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
