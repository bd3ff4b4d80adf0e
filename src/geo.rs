//! Pure coordinate math: EXIF rational conversion and great-circle distance.

use crate::structs::{Coordinate, Rational};

/// Mean earth radius used by the haversine formula, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Converts an EXIF `[degrees, minutes, seconds]` triple to decimal degrees.
///
/// Returns `NaN` when fewer than three components are given or any denominator is
/// zero. Callers must check the result with [`f64::is_finite`].
pub fn gps_rational_to_decimal(parts: &[Rational]) -> f64 {
    let [degree, minute, second, ..] = parts else {
        return f64::NAN;
    };
    if [degree, minute, second].iter().any(|r| r.denominator == 0) {
        return f64::NAN;
    }
    let value = |r: &Rational| f64::from(r.numerator) / f64::from(r.denominator);
    value(degree) + value(minute) / 60.0 + value(second) / 3600.0
}

/// Applies an EXIF hemisphere reference: `S` and `W` are negative.
pub fn apply_hemisphere(decimal: f64, reference: Option<&str>) -> f64 {
    match reference.map(str::trim) {
        Some("S" | "s" | "W" | "w") => -decimal,
        _ => decimal,
    }
}

/// Haversine distance between two coordinates, rounded to whole meters.
///
/// Coordinates are not validated here.
pub fn distance_meters(a: Coordinate, b: Coordinate) -> u64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    (EARTH_RADIUS_M * c).round() as u64
}

/// Renders a distance as `"{km} km ({m} m)"` with two decimals for kilometers.
///
/// Kilometers round from the exact binary value of `meters / 1000`, with exact
/// halves rounding up. Only distances ending in 125, 375, 625 or 875 m are exact
/// halves, so `1125` shows `1.13` while `1005` (stored just below 1.005) shows `1.00`.
pub fn format_distance(meters: u64) -> String {
    if meters % 250 == 125 {
        let hundredths = (meters + 5) / 10;
        return format!("{}.{:02} km ({meters} m)", hundredths / 100, hundredths % 100);
    }
    format!("{:.2} km ({meters} m)", meters as f64 / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dms(d: (u32, u32), m: (u32, u32), s: (u32, u32)) -> Vec<Rational> {
        vec![
            Rational::new(d.0, d.1),
            Rational::new(m.0, m.1),
            Rational::new(s.0, s.1),
        ]
    }

    #[test]
    fn test_rational_to_decimal_whole_values() {
        let result = gps_rational_to_decimal(&dms((37, 1), (30, 1), (0, 1)));
        assert_eq!(result, 37.5);
    }

    #[test]
    fn test_rational_to_decimal_fractional_seconds() {
        // 52° 22' 45.08" as written by most phone cameras.
        let result = gps_rational_to_decimal(&dms((52, 1), (22, 1), (4508, 100)));
        assert!((result - 52.379_189).abs() < 1e-6, "got {result}");
    }

    #[test]
    fn test_rational_to_decimal_is_nan_when_unparseable() {
        assert!(gps_rational_to_decimal(&dms((37, 0), (30, 1), (0, 1))).is_nan());
        assert!(gps_rational_to_decimal(&dms((37, 1), (30, 1), (0, 0))).is_nan());
        assert!(gps_rational_to_decimal(&[Rational::new(37, 1), Rational::new(30, 1)]).is_nan());
        assert!(gps_rational_to_decimal(&[]).is_nan());
    }

    #[test]
    fn test_hemisphere_reference() {
        assert_eq!(apply_hemisphere(33.9, Some("S")), -33.9);
        assert_eq!(apply_hemisphere(151.2, Some("W")), -151.2);
        assert_eq!(apply_hemisphere(37.5, Some("N")), 37.5);
        assert_eq!(apply_hemisphere(127.0, None), 127.0);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        for c in [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(37.5, 127.0),
            Coordinate::new(-89.9, 179.9),
        ] {
            assert_eq!(distance_meters(c, c), 0);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let seoul = Coordinate::new(37.5665, 126.978);
        let busan = Coordinate::new(35.1796, 129.0756);
        assert_eq!(distance_meters(seoul, busan), distance_meters(busan, seoul));
    }

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        let d = distance_meters(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        assert!(d.abs_diff(111_195) <= 1, "got {d}");
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(1234), "1.23 km (1234 m)");
        assert_eq!(format_distance(0), "0.00 km (0 m)");
        assert_eq!(format_distance(2500), "2.50 km (2500 m)");
    }

    #[test]
    fn test_format_distance_exact_halves_round_up() {
        assert_eq!(format_distance(1125), "1.13 km (1125 m)");
        assert_eq!(format_distance(5625), "5.63 km (5625 m)");
        assert_eq!(format_distance(2375), "2.38 km (2375 m)");
        assert_eq!(format_distance(10875), "10.88 km (10875 m)");
        assert_eq!(format_distance(125), "0.13 km (125 m)");
    }

    #[test]
    fn test_format_distance_inexact_halves_follow_stored_value() {
        // 1.005 and 2.675 are stored slightly below the written value.
        assert_eq!(format_distance(1005), "1.00 km (1005 m)");
        assert_eq!(format_distance(2675), "2.67 km (2675 m)");
    }
}
