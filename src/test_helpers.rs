//! Shared fakes for the collaborator traits.
//!
//! Each recorder is cheap to clone and shares its log, so a test can hand one
//! copy to the code under test and inspect the other:
//!
//! ```rust,ignore
//! let map = RecordingMap::default();
//! let mut carousel = EventCarousel::new(Box::new(map.clone()));
//! carousel.load(origin, events);
//! assert_eq!(map.commands()[0], MapCommand::Init(origin, 6));
//! ```

use crate::collaborators::{
    Bounds, MapSurface, Marker, MetadataReader, Notifier, PhotoFile, SearchBackend, SearchRequest,
};
use crate::error::EventFinderError;
use crate::features::error::BackendError;
use crate::structs::{Coordinate, DEFAULT_AUDIENCE, DEFAULT_LINK, Event, GpsTags, Rational, SearchResponse};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

// =========================================================================
// Fixtures
// =========================================================================

/// EXIF-style tags for a point in the northern/eastern hemisphere.
pub fn gps_tags(latitude: f64, longitude: f64) -> GpsTags {
    GpsTags {
        latitude: Some(to_dms(latitude)),
        latitude_ref: Some("N".to_string()),
        longitude: Some(to_dms(longitude)),
        longitude_ref: Some("E".to_string()),
    }
}

fn to_dms(value: f64) -> Vec<Rational> {
    let degrees = value.trunc();
    let minutes_total = (value - degrees) * 60.0;
    let minutes = minutes_total.trunc();
    let seconds = (minutes_total - minutes) * 60.0;
    vec![
        Rational::new(degrees as u32, 1),
        Rational::new(minutes as u32, 1),
        Rational::new((seconds * 100.0).round() as u32, 100),
    ]
}

pub fn event(name: &str, latitude: f64, longitude: f64) -> Event {
    Event {
        name: name.to_string(),
        date_range: "2025-01-01".to_string(),
        audience: DEFAULT_AUDIENCE.to_string(),
        link: DEFAULT_LINK.to_string(),
        location: Some(Coordinate::new(latitude, longitude)),
    }
}

/// Writes a small solid PNG into `dir` and returns its path.
pub fn write_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::from_pixel(8, 8, image::Rgb([200, 120, 40]))
        .save(&path)
        .unwrap();
    path
}

// =========================================================================
// Collaborator fakes
// =========================================================================

pub struct FakeReader {
    tags: Option<GpsTags>,
}

impl FakeReader {
    pub fn with_tags(tags: GpsTags) -> Self {
        Self { tags: Some(tags) }
    }

    pub fn failing() -> Self {
        Self { tags: None }
    }
}

#[async_trait]
impl MetadataReader for FakeReader {
    async fn read_gps_tags(&self, _photo: &PhotoFile) -> Result<GpsTags, EventFinderError> {
        self.tags.clone().ok_or_else(|| {
            EventFinderError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "unreadable",
            ))
        })
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    no_gps: Mutex<usize>,
    failures: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn no_gps_count(&self) -> usize {
        *self.no_gps.lock().unwrap()
    }

    pub fn failures(&self) -> Vec<String> {
        self.failures.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn no_gps_data(&self) {
        *self.no_gps.lock().unwrap() += 1;
    }

    fn search_failed(&self, message: &str) {
        self.failures.lock().unwrap().push(message.to_string());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapCommand {
    Init(Coordinate, u8),
    AddMarker(Marker),
    FitBounds(Bounds),
    PanTo(Coordinate),
    SetCenter(Coordinate),
    SetLevel(u8),
    Relayout,
}

#[derive(Clone, Default)]
pub struct RecordingMap {
    log: Arc<Mutex<Vec<MapCommand>>>,
}

impl RecordingMap {
    pub fn commands(&self) -> Vec<MapCommand> {
        self.log.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.log.lock().unwrap().clear();
    }

    fn push(&self, command: MapCommand) {
        self.log.lock().unwrap().push(command);
    }
}

impl MapSurface for RecordingMap {
    fn init(&mut self, center: Coordinate, level: u8) {
        self.push(MapCommand::Init(center, level));
    }

    fn add_marker(&mut self, marker: Marker) {
        self.push(MapCommand::AddMarker(marker));
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.push(MapCommand::FitBounds(bounds));
    }

    fn pan_to(&mut self, position: Coordinate) {
        self.push(MapCommand::PanTo(position));
    }

    fn set_center(&mut self, position: Coordinate) {
        self.push(MapCommand::SetCenter(position));
    }

    fn set_level(&mut self, level: u8) {
        self.push(MapCommand::SetLevel(level));
    }

    fn relayout(&mut self) {
        self.push(MapCommand::Relayout);
    }
}

/// Answers exactly one search with a canned reply and records the request.
pub struct FakeBackend {
    reply: Mutex<Option<Result<SearchResponse, BackendError>>>,
    requests: Mutex<Vec<SearchRequest>>,
}

impl FakeBackend {
    pub fn responding(response: SearchResponse) -> Self {
        Self::replying(Ok(response))
    }

    pub fn failing(error: BackendError) -> Self {
        Self::replying(Err(error))
    }

    fn replying(reply: Result<SearchResponse, BackendError>) -> Self {
        Self {
            reply: Mutex::new(Some(reply)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchBackend for FakeBackend {
    async fn search_events(&self, request: SearchRequest) -> Result<SearchResponse, BackendError> {
        self.requests.lock().unwrap().push(request);
        self.reply
            .lock()
            .unwrap()
            .take()
            .expect("FakeBackend answers a single search")
    }
}
