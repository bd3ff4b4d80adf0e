use thiserror::Error;

/// Message used when the backend fails without saying why.
pub const GENERIC_SERVER_ERROR: &str = "Server error occurred.";

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Request to the event search service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("{0}")]
    Rejected(String),

    #[error("Malformed search response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

impl BackendError {
    /// The text shown to the user, without the transport details.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } | Self::Rejected(message) => message.clone(),
            Self::Transport(err) => err.to_string(),
            Self::MalformedResponse(_) => GENERIC_SERVER_ERROR.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum DataUrlError {
    #[error("Unsupported file type for data URL generation: {0}")]
    UnsupportedFileType(String),

    #[error("Image could not be decoded: {0}")]
    ImageProcessing(#[from] image::ImageError),

    // For thumbnail.write_to, though rare for in-memory buffers
    #[error("I/O error during thumbnail generation")]
    Io(#[from] std::io::Error),
}
