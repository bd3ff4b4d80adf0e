//! Drives a search session from photo selection through results and back.

use crate::carousel::{DEFAULT_EMPTY_MAP_LEVEL, DEFAULT_MAP_LEVEL, EventCarousel};
use crate::collaborators::{
    MapSurface, MetadataReader, Notifier, PhotoFile, SearchBackend, SearchRequest,
};
use crate::error::EventFinderError;
use crate::features::data_url::file_to_data_url;
use crate::photo_intake::{CompletedRead, GpsStatus, PendingRead, PhotoIntake};
use crate::structs::{Coordinate, Event, SearchResponse};
use bon::bon;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

pub const SEARCH_LABEL: &str = "Search";
pub const SEARCHING_LABEL: &str = "Searching...";
pub const DEFAULT_PHOTO_SUMMARY: &str = "Unable to interpret the photo location.";

/// Which of the two screens is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Input,
    Results,
}

/// State of the button that starts a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchControl {
    pub enabled: bool,
    pub busy: bool,
    pub label: &'static str,
}

impl Default for SearchControl {
    fn default() -> Self {
        Self {
            enabled: false,
            busy: false,
            label: SEARCH_LABEL,
        }
    }
}

/// Header shown above the results.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsSummary {
    /// JPEG data URL of the uploaded photo, when it could be decoded.
    pub preview: Option<String>,
    pub photo_summary: String,
    pub date: NaiveDate,
    pub location: Coordinate,
}

impl ResultsSummary {
    pub fn location_text(&self) -> String {
        self.location.to_string()
    }
}

/// Drives one session of the tool: photo and date intake, the search call, and
/// the results carousel.
///
/// ```rust,no_run
/// # use std::sync::Arc;
/// # use photo_event_finder::{EventFinder, EventFinderError, PhotoFile};
/// # use photo_event_finder::collaborators::{MapSurface, Notifier};
/// # use photo_event_finder::features::{ExifMetadataReader, HttpSearchBackend};
/// # async fn run(map: Box<dyn MapSurface>, notifier: Arc<dyn Notifier>) -> Result<(), EventFinderError> {
/// let mut finder = EventFinder::builder()
///     .backend(Arc::new(HttpSearchBackend::builder().base_url("http://127.0.0.1:3001").build()))
///     .metadata_reader(Arc::new(ExifMetadataReader))
///     .notifier(notifier)
///     .map(map)
///     .build();
///
/// finder.choose_file(Some(PhotoFile::new("assets/festival.jpg"))).await;
/// finder.date_input("2025-01-01");
/// if finder.search_control().enabled {
///     finder.search().await?;
/// }
/// # Ok(())
/// # }
/// ```
pub struct EventFinder {
    backend: Arc<dyn SearchBackend>,
    notifier: Arc<dyn Notifier>,
    intake: PhotoIntake,
    carousel: EventCarousel,
    view: ViewState,
    search_control: SearchControl,
    summary: Option<ResultsSummary>,
    relayout_delay: Duration,
    preview_max_size: (u32, u32),
}

#[bon]
impl EventFinder {
    /// Constructs an `EventFinder` via a builder pattern.
    ///
    /// # Builder Arguments
    ///
    /// * `backend` - The event search service.
    /// * `metadata_reader` - Extracts GPS tags from picked photos.
    /// * `notifier` - Shows the no-GPS advisory and search failures.
    /// * `map` - The map widget the results are drawn on.
    /// * `relayout_delay: Duration` - (Default: 50 ms) Wait before forcing a map relayout once results are visible.
    /// * `preview_max_size: (u32, u32)` - (Default: `(320, 320)`) Bounding box of the photo preview.
    /// * `map_level: u8` - (Default: `6`) Initial zoom level of the results map.
    /// * `empty_map_level: u8` - (Default: `7`) Zoom level used when no events were found.
    #[builder]
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        metadata_reader: Arc<dyn MetadataReader>,
        notifier: Arc<dyn Notifier>,
        map: Box<dyn MapSurface>,
        #[builder(default = Duration::from_millis(50))] relayout_delay: Duration,
        #[builder(default = (320, 320))] preview_max_size: (u32, u32),
        #[builder(default = DEFAULT_MAP_LEVEL)] map_level: u8,
        #[builder(default = DEFAULT_EMPTY_MAP_LEVEL)] empty_map_level: u8,
    ) -> Self {
        Self {
            backend,
            intake: PhotoIntake::new(metadata_reader, notifier.clone()),
            notifier,
            carousel: EventCarousel::with_map_levels(map, map_level, empty_map_level),
            view: ViewState::Input,
            search_control: SearchControl::default(),
            summary: None,
            relayout_delay,
            preview_max_size,
        }
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn search_control(&self) -> &SearchControl {
        &self.search_control
    }

    pub fn summary(&self) -> Option<&ResultsSummary> {
        self.summary.as_ref()
    }

    pub fn intake(&self) -> &PhotoIntake {
        &self.intake
    }

    pub fn carousel(&self) -> &EventCarousel {
        &self.carousel
    }

    /// For navigation: prev/next buttons, page buttons and marker clicks.
    pub fn carousel_mut(&mut self) -> &mut EventCarousel {
        &mut self.carousel
    }

    /// Starts a file selection without waiting for its metadata.
    pub fn select_file(&mut self, photo: Option<PhotoFile>) -> Option<PendingRead> {
        let pending = self.intake.select_file(photo);
        self.refresh_readiness();
        pending
    }

    /// Hands back a metadata read started by [`EventFinder::select_file`].
    pub fn complete_gps_read(&mut self, read: CompletedRead) -> bool {
        let applied = self.intake.complete_read(read);
        self.refresh_readiness();
        applied
    }

    /// Selects a file and waits for its GPS status to resolve.
    pub async fn choose_file(&mut self, photo: Option<PhotoFile>) -> GpsStatus {
        let status = self.intake.on_file_selected(photo).await;
        self.refresh_readiness();
        status
    }

    pub fn select_date(&mut self, date: Option<NaiveDate>) {
        self.intake.on_date_selected(date);
        self.refresh_readiness();
    }

    pub fn date_input(&mut self, input: &str) {
        self.intake.on_date_input(input);
        self.refresh_readiness();
    }

    fn refresh_readiness(&mut self) {
        if !self.search_control.busy {
            self.search_control.enabled = self.intake.is_ready();
        }
    }

    /// Sends the selected photo and date to the search service and shows the results.
    ///
    /// On failure the user is notified, the session returns to the input view with
    /// its selections cleared, and the error is returned for logging.
    ///
    /// # Errors
    ///
    /// * [`EventFinderError::NotReady`] when the photo, date or GPS position is missing. Nothing changes.
    /// * [`EventFinderError::Io`] when the photo can no longer be read.
    /// * [`EventFinderError::Backend`] when the service is unreachable, answers with an error status, or rejects the search.
    pub async fn search(&mut self) -> Result<(), EventFinderError> {
        let (Some(photo), Some(date), true) = (
            self.intake.photo().cloned(),
            self.intake.date(),
            self.intake.is_ready(),
        ) else {
            return Err(EventFinderError::NotReady);
        };

        self.search_control = SearchControl {
            enabled: false,
            busy: true,
            label: SEARCHING_LABEL,
        };
        info!(photo = %photo.path().display(), %date, "Searching for nearby events");

        let result = match self.request_events(&photo, date).await {
            Ok(response) => {
                self.show_results(&photo, date, response).await;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Event search failed");
                let message = match &e {
                    EventFinderError::Backend(backend) => backend.user_message(),
                    other => other.to_string(),
                };
                self.notifier
                    .search_failed(&format!("Failed to search events: {message}"));
                self.return_to_input();
                Err(e)
            }
        };

        self.search_control.busy = false;
        self.search_control.label = SEARCH_LABEL;
        self.refresh_readiness();
        result
    }

    async fn request_events(
        &self,
        photo: &PhotoFile,
        date: NaiveDate,
    ) -> Result<SearchResponse, EventFinderError> {
        let bytes = tokio::fs::read(photo.path()).await?;
        let request = SearchRequest {
            file_name: photo.name(),
            photo: bytes,
            target_date: date,
        };
        Ok(self.backend.search_events(request).await?)
    }

    async fn show_results(&mut self, photo: &PhotoFile, date: NaiveDate, response: SearchResponse) {
        let SearchResponse {
            location,
            photo_summary,
            events,
        } = response;
        let events: Vec<Event> = events.into_iter().map(Event::from).collect();
        info!(count = events.len(), %location, "Event search succeeded");

        let preview = file_to_data_url(photo.path(), self.preview_max_size)
            .inspect_err(|e| warn!(error = %e, "Could not build photo preview"))
            .ok();
        self.summary = Some(ResultsSummary {
            preview,
            photo_summary: photo_summary
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PHOTO_SUMMARY.to_string()),
            date,
            location,
        });

        self.carousel.load(location, events);
        self.view = ViewState::Results;

        // The map was laid out while hidden.
        tokio::time::sleep(self.relayout_delay).await;
        let map = self.carousel.map_mut();
        map.relayout();
        map.set_center(location);
    }

    /// Leaves the results view and starts over.
    pub fn go_back(&mut self) {
        self.return_to_input();
        self.refresh_readiness();
    }

    fn return_to_input(&mut self) {
        self.view = ViewState::Input;
        self.intake.reset();
        self.carousel.reset();
        self.summary = None;
    }
}
