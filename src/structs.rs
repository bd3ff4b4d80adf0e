use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

pub const DEFAULT_AUDIENCE: &str = "N/A";
pub const DEFAULT_LINK: &str = "#";

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Builds a coordinate only when both values are finite and within range.
    pub fn checked(latitude: f64, longitude: f64) -> Option<Self> {
        let coordinate = Self::new(latitude, longitude);
        coordinate.is_valid().then_some(coordinate)
    }

    /// Latitude in [-90, 90] and longitude in [-180, 180]. NaN fails both.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// One EXIF rational component, e.g. the degrees of a GPS latitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

/// Raw GPS tag values as read from a photo's EXIF block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GpsTags {
    pub latitude: Option<Vec<Rational>>,
    pub latitude_ref: Option<String>,
    pub longitude: Option<Vec<Rational>>,
    pub longitude_ref: Option<String>,
}

/// A candidate event, normalized from the backend's response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub name: String,
    pub date_range: String,
    pub audience: String,
    pub link: String,
    /// `None` when the backend sent a missing, unparseable or out-of-range position.
    pub location: Option<Coordinate>,
}

impl From<RawEvent> for Event {
    fn from(raw: RawEvent) -> Self {
        let location = match (raw.latitude, raw.longitude) {
            (Some(lat), Some(lon)) => Coordinate::checked(lat, lon),
            _ => None,
        };
        Self {
            name: raw.name,
            date_range: raw.date_range,
            audience: raw
                .audience
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| DEFAULT_AUDIENCE.to_string()),
            link: raw
                .link
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| DEFAULT_LINK.to_string()),
            location,
        }
    }
}

/// An event exactly as the backend sends it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date_range: String,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
}

/// Successful search payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResponse {
    pub location: Coordinate,
    #[serde(default)]
    pub photo_summary: Option<String>,
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

/// Upstream event feeds send coordinates as numbers or as numeric strings.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coordinate_range_checks() {
        assert!(Coordinate::new(90.0, -180.0).is_valid());
        assert!(!Coordinate::new(90.5, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 181.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
        assert!(Coordinate::checked(f64::INFINITY, 0.0).is_none());
    }

    #[test]
    fn test_coordinate_displays_four_decimals() {
        assert_eq!(Coordinate::new(37.5, 127.0).to_string(), "37.5000, 127.0000");
        assert_eq!(
            Coordinate::new(37.566_535, 126.977_969).to_string(),
            "37.5665, 126.9780"
        );
    }

    #[test]
    fn test_raw_event_normalizes_defaults() {
        let raw: RawEvent = serde_json::from_value(json!({
            "name": "Lantern Festival",
            "date_range": "2025-01-01~2025-01-31",
            "latitude": 37.57,
            "longitude": 126.98
        }))
        .unwrap();
        let event = Event::from(raw);

        assert_eq!(event.audience, "N/A");
        assert_eq!(event.link, "#");
        assert_eq!(event.location, Some(Coordinate::new(37.57, 126.98)));
    }

    #[test]
    fn test_raw_event_accepts_string_coordinates() {
        let raw: RawEvent = serde_json::from_value(json!({
            "name": "Jazz Night",
            "date_range": "2025-01-01",
            "audience": "All ages",
            "link": "https://example.org/jazz",
            "latitude": "37.5512",
            "longitude": " 126.9882 "
        }))
        .unwrap();
        let event = Event::from(raw);

        assert_eq!(event.audience, "All ages");
        assert_eq!(event.link, "https://example.org/jazz");
        assert_eq!(event.location, Some(Coordinate::new(37.5512, 126.9882)));
    }

    #[test]
    fn test_raw_event_with_unusable_coordinates_has_no_location() {
        let raw: RawEvent = serde_json::from_value(json!({
            "name": "Somewhere",
            "date_range": "2025-01-01",
            "audience": null,
            "link": "",
            "latitude": "not a number",
            "longitude": 126.9
        }))
        .unwrap();
        let event = Event::from(raw);

        assert!(event.location.is_none());
        assert_eq!(event.audience, "N/A");
        assert_eq!(event.link, "#");

        let out_of_range: RawEvent = serde_json::from_value(json!({
            "name": "Nowhere",
            "date_range": "2025-01-01",
            "latitude": 123.0,
            "longitude": 10.0
        }))
        .unwrap();
        assert!(Event::from(out_of_range).location.is_none());
    }
}
