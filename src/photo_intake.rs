//! Tracks the photo and date the user picked and whether the photo's GPS
//! position is known, which together gate the search action.

use crate::collaborators::{MetadataReader, Notifier, PhotoFile};
use crate::error::EventFinderError;
use crate::geo::{apply_hemisphere, gps_rational_to_decimal};
use crate::structs::{Coordinate, GpsTags};
use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where the selected photo's GPS lookup stands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GpsStatus {
    Unset,
    Loading,
    Resolved(Coordinate),
    NoGpsData,
    InvalidGpsData,
}

impl GpsStatus {
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            Self::Resolved(c) => Some(*c),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

impl fmt::Display for GpsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("N/A"),
            Self::Loading => f.write_str("Loading GPS..."),
            Self::Resolved(c) => write!(f, "{c}"),
            Self::NoGpsData => f.write_str("N/A (No GPS Data)"),
            Self::InvalidGpsData => f.write_str("N/A (Invalid GPS Data)"),
        }
    }
}

/// Turns raw EXIF GPS tags into a terminal status.
pub fn resolve_gps_status(tags: &GpsTags) -> GpsStatus {
    let (Some(latitude), Some(longitude)) = (&tags.latitude, &tags.longitude) else {
        return GpsStatus::NoGpsData;
    };
    let latitude = apply_hemisphere(
        gps_rational_to_decimal(latitude),
        tags.latitude_ref.as_deref(),
    );
    let longitude = apply_hemisphere(
        gps_rational_to_decimal(longitude),
        tags.longitude_ref.as_deref(),
    );
    Coordinate::checked(latitude, longitude).map_or(GpsStatus::InvalidGpsData, GpsStatus::Resolved)
}

/// Identifies one file selection. Later selections always carry a larger token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SelectionToken(u64);

/// A metadata read that still has to run for a selection.
#[derive(Debug, Clone)]
pub struct PendingRead {
    pub token: SelectionToken,
    pub photo: PhotoFile,
}

impl PendingRead {
    pub async fn run(self, reader: &dyn MetadataReader) -> CompletedRead {
        let result = reader.read_gps_tags(&self.photo).await;
        CompletedRead {
            token: self.token,
            result,
        }
    }
}

/// The outcome of a [`PendingRead`], to be handed back to [`PhotoIntake::complete_read`].
#[derive(Debug)]
pub struct CompletedRead {
    pub token: SelectionToken,
    pub result: Result<GpsTags, EventFinderError>,
}

pub struct PhotoIntake {
    reader: Arc<dyn MetadataReader>,
    notifier: Arc<dyn Notifier>,
    photo: Option<PhotoFile>,
    date: Option<NaiveDate>,
    gps_status: GpsStatus,
    selection: u64,
}

impl PhotoIntake {
    pub fn new(reader: Arc<dyn MetadataReader>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            reader,
            notifier,
            photo: None,
            date: None,
            gps_status: GpsStatus::Unset,
            selection: 0,
        }
    }

    pub fn photo(&self) -> Option<&PhotoFile> {
        self.photo.as_ref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn gps_status(&self) -> GpsStatus {
        self.gps_status
    }

    /// A photo and a date are selected and the photo's position is resolved.
    pub fn is_ready(&self) -> bool {
        self.photo.is_some() && self.date.is_some() && self.gps_status.is_resolved()
    }

    /// Starts a new selection. Returns the metadata read to run, if a file was picked.
    ///
    /// Any read still in flight for an earlier selection becomes stale.
    pub fn select_file(&mut self, photo: Option<PhotoFile>) -> Option<PendingRead> {
        self.selection += 1;
        self.photo = photo.clone();
        match photo {
            None => {
                debug!("Photo selection cleared");
                self.gps_status = GpsStatus::Unset;
                None
            }
            Some(photo) => {
                info!(photo = %photo.path().display(), "Photo selected, reading GPS metadata");
                self.gps_status = GpsStatus::Loading;
                Some(PendingRead {
                    token: SelectionToken(self.selection),
                    photo,
                })
            }
        }
    }

    /// Applies a finished metadata read. Returns `false` when the read was stale and ignored.
    pub fn complete_read(&mut self, read: CompletedRead) -> bool {
        if read.token != SelectionToken(self.selection) || self.photo.is_none() {
            debug!(token = read.token.0, current = self.selection, "Discarding stale GPS read");
            return false;
        }

        self.gps_status = match read.result {
            Ok(tags) => resolve_gps_status(&tags),
            Err(e) => {
                warn!(error = %e, "Could not read photo metadata");
                GpsStatus::NoGpsData
            }
        };
        info!(status = %self.gps_status, "GPS metadata resolved");

        if self.gps_status == GpsStatus::NoGpsData {
            self.notifier.no_gps_data();
        }
        true
    }

    /// Selects a file and waits for its metadata to resolve.
    pub async fn on_file_selected(&mut self, photo: Option<PhotoFile>) -> GpsStatus {
        if let Some(pending) = self.select_file(photo) {
            let completed = pending.run(self.reader.as_ref()).await;
            self.complete_read(completed);
        }
        self.gps_status
    }

    pub fn on_date_selected(&mut self, date: Option<NaiveDate>) {
        self.date = date;
    }

    /// Parses a `YYYY-MM-DD` date input. Empty or malformed input clears the date.
    pub fn on_date_input(&mut self, input: &str) {
        let input = input.trim();
        let date = if input.is_empty() {
            None
        } else {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .inspect_err(|e| warn!(input, error = %e, "Ignoring malformed date"))
                .ok()
        };
        self.on_date_selected(date);
    }

    /// Forgets the photo, date and status. In-flight reads become stale.
    pub fn reset(&mut self) {
        self.selection += 1;
        self.photo = None;
        self.date = None;
        self.gps_status = GpsStatus::Unset;
    }
}
