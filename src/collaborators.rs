//! Seams to the pieces this crate drives but does not implement: metadata
//! extraction, the event search service, the map widget and user notifications.

use crate::error::EventFinderError;
use crate::features::error::BackendError;
use crate::structs::{Coordinate, GpsTags, SearchResponse};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// A photo the user picked. Only the path is owned here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoFile {
    path: PathBuf,
}

impl PhotoFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for display and upload, falling back to `photo`.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string())
    }
}

/// Reads GPS tags from a photo.
#[async_trait]
pub trait MetadataReader: Send + Sync {
    async fn read_gps_tags(&self, photo: &PhotoFile) -> Result<GpsTags, EventFinderError>;
}

/// What the search service receives.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub file_name: String,
    pub photo: Vec<u8>,
    pub target_date: NaiveDate,
}

/// The event search service.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search_events(&self, request: SearchRequest) -> Result<SearchResponse, BackendError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerIcon {
    /// Where the photo was taken.
    PhotoLocation,
    Event,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coordinate,
    pub icon: MarkerIcon,
    pub title: String,
    /// Event index a click on this marker should navigate to.
    pub event_index: Option<usize>,
}

/// Axis-aligned region covering a set of coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Bounds {
    pub fn around(point: Coordinate) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    pub fn extend(&mut self, point: Coordinate) {
        self.south_west.latitude = self.south_west.latitude.min(point.latitude);
        self.south_west.longitude = self.south_west.longitude.min(point.longitude);
        self.north_east.latitude = self.north_east.latitude.max(point.latitude);
        self.north_east.longitude = self.north_east.longitude.max(point.longitude);
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        (self.south_west.latitude..=self.north_east.latitude).contains(&point.latitude)
            && (self.south_west.longitude..=self.north_east.longitude).contains(&point.longitude)
    }
}

/// The interactive map widget shown next to the results.
pub trait MapSurface: Send {
    /// Recreates the map centered on `center` at zoom `level`, dropping old markers.
    fn init(&mut self, center: Coordinate, level: u8);
    fn add_marker(&mut self, marker: Marker);
    fn fit_bounds(&mut self, bounds: Bounds);
    fn pan_to(&mut self, position: Coordinate);
    fn set_center(&mut self, position: Coordinate);
    fn set_level(&mut self, level: u8);
    /// Recomputes layout after the map's container became visible.
    fn relayout(&mut self);
}

/// User-facing notifications.
pub trait Notifier: Send + Sync {
    /// Advisory shown once when a picked photo carries no GPS data.
    fn no_gps_data(&self);
    /// Blocking message for a failed search.
    fn search_failed(&self, message: &str);
}
