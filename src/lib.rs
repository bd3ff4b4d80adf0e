//! # Photo Event Finder
//!
//! Find events happening near where a photo was taken, on a date of your choosing.
//!
//! The user picks a photo, its EXIF GPS position is read, the user picks a date, and
//! an event search service is asked for events near that position on that date. The
//! results are presented as a carousel kept in sync with a map.
//!
//! ## Key Features
//!
//! - **GPS from EXIF**: Converts degree/minute/second rationals into decimal coordinates, honoring hemisphere references.
//! - **Search Readiness**: Tracks the selected photo, date and GPS status, ignoring metadata reads that finish after a newer selection.
//! - **Distances**: Haversine great-circle distance from the photo to every event.
//! - **Results Carousel**: Wrapping next/previous/page navigation that keeps the detail panel, page buttons and map viewport aligned.
//!
//! ## Usage
//!
//! Build an [`EventFinder`] with the collaborators it drives, feed it user actions, and
//! render its state.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use photo_event_finder::collaborators::{MapSurface, Notifier};
//! use photo_event_finder::features::{ExifMetadataReader, HttpSearchBackend};
//! use photo_event_finder::{EventFinder, PhotoFile};
//!
//! async fn run(map: Box<dyn MapSurface>, notifier: Arc<dyn Notifier>) -> Result<(), photo_event_finder::EventFinderError> {
//!     let mut finder = EventFinder::builder()
//!         .backend(Arc::new(HttpSearchBackend::builder().base_url("http://127.0.0.1:3001").build()))
//!         .metadata_reader(Arc::new(ExifMetadataReader))
//!         .notifier(notifier)
//!         .map(map)
//!         .build();
//!
//!     finder.choose_file(Some(PhotoFile::new("assets/festival.jpg"))).await;
//!     finder.date_input("2025-01-01");
//!     finder.search().await?;
//!
//!     println!("Detail: {:?}", finder.carousel().detail());
//!     finder.carousel_mut().next();
//!     Ok(())
//! }
//! ```

pub mod carousel;
pub mod collaborators;
pub mod error;
pub mod features;
pub mod finder;
pub mod geo;
pub mod photo_intake;
pub mod structs;

#[cfg(test)]
mod test_helpers;

pub use carousel::{DetailPanel, EventCarousel, EventDetail, NavigationControls};
pub use collaborators::PhotoFile;
pub use error::EventFinderError;
pub use finder::{EventFinder, ResultsSummary, SearchControl, ViewState};
pub use geo::{distance_meters, gps_rational_to_decimal};
pub use photo_intake::{GpsStatus, PhotoIntake};
pub use structs::{Coordinate, Event, GpsTags, Rational};
