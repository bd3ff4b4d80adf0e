//! Concrete adapters for the collaborator traits, plus photo preview encoding.
pub mod data_url;
pub mod error;
pub mod exif_reader;
pub mod http_backend;

pub use exif_reader::ExifMetadataReader;
pub use http_backend::HttpSearchBackend;
