//! The navigable list of search results, kept in sync with its detail panel,
//! pagination controls and the map viewport.

use crate::collaborators::{Bounds, MapSurface, Marker, MarkerIcon};
use crate::geo::{distance_meters, format_distance};
use crate::structs::{Coordinate, Event};
use tracing::debug;

pub const NO_EVENTS_MESSAGE: &str = "No nearby events found. Try another date.";
pub const DISTANCE_UNAVAILABLE: &str = "Distance: N/A";
pub const PHOTO_MARKER_TITLE: &str = "My Photo Location";

pub const DEFAULT_MAP_LEVEL: u8 = 6;
pub const DEFAULT_EMPTY_MAP_LEVEL: u8 = 7;

/// Text shown for the current event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetail {
    /// One-based position in the list.
    pub ordinal: usize,
    pub name: String,
    pub date_range: String,
    pub distance: String,
    pub audience: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailPanel {
    Empty { message: &'static str },
    Event(EventDetail),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageButton {
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationControls {
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub pagination_visible: bool,
    pub pages: Vec<PageButton>,
}

/// Distance from `origin` to `target` for display, or `Distance: N/A` when either is unusable.
pub fn distance_text(origin: Option<Coordinate>, target: Option<Coordinate>) -> String {
    match (origin, target) {
        (Some(a), Some(b)) if a.is_valid() && b.is_valid() => format_distance(distance_meters(a, b)),
        _ => DISTANCE_UNAVAILABLE.to_string(),
    }
}

pub struct EventCarousel {
    map: Box<dyn MapSurface>,
    map_level: u8,
    empty_map_level: u8,
    origin: Option<Coordinate>,
    events: Vec<Event>,
    current_index: usize,
    detail: DetailPanel,
    controls: NavigationControls,
}

impl EventCarousel {
    pub fn new(map: Box<dyn MapSurface>) -> Self {
        Self::with_map_levels(map, DEFAULT_MAP_LEVEL, DEFAULT_EMPTY_MAP_LEVEL)
    }

    pub fn with_map_levels(map: Box<dyn MapSurface>, map_level: u8, empty_map_level: u8) -> Self {
        Self {
            map,
            map_level,
            empty_map_level,
            origin: None,
            events: Vec::new(),
            current_index: 0,
            detail: DetailPanel::Empty {
                message: NO_EVENTS_MESSAGE,
            },
            controls: NavigationControls::default(),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_event(&self) -> Option<&Event> {
        self.events.get(self.current_index)
    }

    pub fn origin(&self) -> Option<Coordinate> {
        self.origin
    }

    pub fn detail(&self) -> &DetailPanel {
        &self.detail
    }

    pub fn controls(&self) -> &NavigationControls {
        &self.controls
    }

    pub fn map_mut(&mut self) -> &mut dyn MapSurface {
        self.map.as_mut()
    }

    /// Replaces the results, places them on the map and shows the first one.
    pub fn load(&mut self, origin: Coordinate, events: Vec<Event>) {
        debug!(count = events.len(), "Loading events into carousel");
        self.origin = Some(origin);
        self.events = events;
        self.current_index = 0;

        self.place_markers(origin);
        self.controls.pagination_visible = self.events.len() > 1;
        self.controls.pages = if self.controls.pagination_visible {
            (1..=self.events.len())
                .map(|n| PageButton {
                    label: n.to_string(),
                    active: false,
                })
                .collect()
        } else {
            Vec::new()
        };

        self.move_to(0);
    }

    fn place_markers(&mut self, origin: Coordinate) {
        self.map.init(origin, self.map_level);
        self.map.add_marker(Marker {
            position: origin,
            icon: MarkerIcon::PhotoLocation,
            title: PHOTO_MARKER_TITLE.to_string(),
            event_index: None,
        });

        let mut bounds = Bounds::around(origin);
        for (index, event) in self.events.iter().enumerate() {
            let Some(position) = event.location else {
                continue;
            };
            self.map.add_marker(Marker {
                position,
                icon: MarkerIcon::Event,
                title: event.name.clone(),
                event_index: Some(index),
            });
            bounds.extend(position);
        }

        if self.events.is_empty() {
            self.map.set_center(origin);
            self.map.set_level(self.empty_map_level);
        } else {
            self.map.fit_bounds(bounds);
        }
    }

    /// Shows the event at `target`, wrapping around both ends. Does nothing but
    /// render the empty state when there are no events.
    pub fn move_to(&mut self, target: isize) {
        if self.events.is_empty() {
            self.render_empty();
            return;
        }

        let index = target.rem_euclid(self.events.len() as isize) as usize;
        self.current_index = index;
        let event = &self.events[index];

        self.detail = DetailPanel::Event(EventDetail {
            ordinal: index + 1,
            name: event.name.clone(),
            date_range: event.date_range.clone(),
            distance: distance_text(self.origin, event.location),
            audience: event.audience.clone(),
            link: event.link.clone(),
        });
        if let Some(position) = event.location {
            self.map.pan_to(position);
        }

        let navigable = self.events.len() > 1;
        self.controls.prev_enabled = navigable;
        self.controls.next_enabled = navigable;
        for (i, page) in self.controls.pages.iter_mut().enumerate() {
            page.active = i == index;
        }
    }

    pub fn next(&mut self) {
        self.move_to(self.current_index as isize + 1);
    }

    pub fn prev(&mut self) {
        self.move_to(self.current_index as isize - 1);
    }

    /// Drops all results. The map is left as is until the next load.
    pub fn reset(&mut self) {
        self.origin = None;
        self.events.clear();
        self.current_index = 0;
        self.render_empty();
    }

    fn render_empty(&mut self) {
        self.detail = DetailPanel::Empty {
            message: NO_EVENTS_MESSAGE,
        };
        self.controls = NavigationControls::default();
    }
}
