use thiserror::Error;

/// The primary error type for the photo-event-finder crate.
#[derive(Error, Debug)]
pub enum EventFinderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("EXIF metadata could not be read: {0}")]
    Exif(#[from] exif::Error),

    #[error("Metadata extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    // --- Custom Module Errors ---
    #[error("Event search failed: {0}")]
    Backend(#[from] crate::features::error::BackendError),

    #[error("Photo preview generation failed: {0}")]
    DataUrl(#[from] crate::features::error::DataUrlError),

    // --- Specific Logic Errors ---
    #[error("Search requires a photo with GPS data and a date")]
    NotReady,

    #[error("No photo is selected")]
    NoPhotoSelected,
}
