use photo_event_finder::carousel::DetailPanel;
use photo_event_finder::collaborators::{Bounds, MapSurface, Marker, Notifier};
use photo_event_finder::features::{ExifMetadataReader, HttpSearchBackend};
use photo_event_finder::{Coordinate, EventFinder, PhotoFile};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Logs map calls instead of drawing them.
struct LogMap;

impl MapSurface for LogMap {
    fn init(&mut self, center: Coordinate, level: u8) {
        info!(%center, level, "map: init");
    }
    fn add_marker(&mut self, marker: Marker) {
        info!(title = %marker.title, position = %marker.position, "map: marker");
    }
    fn fit_bounds(&mut self, bounds: Bounds) {
        info!(sw = %bounds.south_west, ne = %bounds.north_east, "map: fit bounds");
    }
    fn pan_to(&mut self, position: Coordinate) {
        info!(%position, "map: pan");
    }
    fn set_center(&mut self, position: Coordinate) {
        info!(%position, "map: center");
    }
    fn set_level(&mut self, level: u8) {
        info!(level, "map: level");
    }
    fn relayout(&mut self) {
        info!("map: relayout");
    }
}

struct LogNotifier;

impl Notifier for LogNotifier {
    fn no_gps_data(&self) {
        warn!("This photo has no GPS data. Pick a photo taken with location enabled.");
    }
    fn search_failed(&self, message: &str) {
        warn!("{message}");
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let photo = args.next().unwrap_or_else(|| "assets/festival.jpg".to_string());
    let date = args.next().unwrap_or_else(|| "2025-01-01".to_string());
    let base_url = args.next().unwrap_or_else(|| "http://127.0.0.1:3001".to_string());

    let mut finder = EventFinder::builder()
        .backend(Arc::new(HttpSearchBackend::builder().base_url(base_url).build()))
        .metadata_reader(Arc::new(ExifMetadataReader))
        .notifier(Arc::new(LogNotifier))
        .map(Box::new(LogMap))
        .build();

    let status = finder.choose_file(Some(PhotoFile::new(photo))).await;
    println!("GPS: {status}");
    finder.date_input(&date);
    if !finder.search_control().enabled {
        println!("Not ready to search.");
        return Ok(());
    }

    if finder.search().await.is_err() {
        return Ok(());
    }
    if let Some(summary) = finder.summary() {
        println!("{} ({}, {})", summary.photo_summary, summary.location_text(), summary.date);
    }
    for _ in 0..finder.carousel().len() {
        if let DetailPanel::Event(detail) = finder.carousel().detail() {
            println!(
                "{}. {} | {} | {} | {} | {}",
                detail.ordinal, detail.name, detail.date_range, detail.distance, detail.audience, detail.link
            );
        }
        finder.carousel_mut().next();
    }

    Ok(())
}
