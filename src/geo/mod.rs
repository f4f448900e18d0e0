pub mod bng;
pub mod polyline;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_OFFSET_LAT: f64 = 0.02;
pub const DEFAULT_OFFSET_LON: f64 = 0.05;

/// WGS84 position in decimal degrees.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Error, Debug, PartialEq)]
#[error("coordinate out of range: lat={lat}, lon={lon}")]
pub struct InvalidCoordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinate> {
        let valid = (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon);

        if valid {
            Ok(Self { lat, lon })
        } else {
            Err(InvalidCoordinate { lat, lon })
        }
    }

    /// Position in GeoJSON axis order.
    pub fn to_lon_lat(self) -> Vec<f64> {
        vec![self.lon, self.lat]
    }
}

/// Displacement of the turnaround point relative to the start, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Offset {
    pub lat: f64,
    pub lon: f64,
}

impl Default for Offset {
    fn default() -> Self {
        Self {
            lat: DEFAULT_OFFSET_LAT,
            lon: DEFAULT_OFFSET_LON,
        }
    }
}

/// Builds the waypoints of an offset-and-return loop: start, turnaround, start.
///
/// The last element is a copy of `start`, so the router is asked to finish on
/// exactly the coordinate it began from. Offsets are not bounded and a zero
/// offset is passed through; the router decides what to make of it.
pub fn loop_waypoints(start: Coord, offset: Offset) -> Vec<Coord> {
    let turnaround = Coord {
        lat: start.lat + offset.lat,
        lon: start.lon + offset.lon,
    };

    vec![start, turnaround, start]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(Coord::new(50.9, -1.4).is_ok());
        assert!(Coord::new(90.0, 180.0).is_ok());
        assert_eq!(
            Coord::new(91.0, 0.0),
            Err(InvalidCoordinate { lat: 91.0, lon: 0.0 })
        );
        assert!(Coord::new(0.0, -180.5).is_err());
        assert!(Coord::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn loop_starts_and_ends_on_the_same_point() {
        let start = Coord::new(50.907_595, -1.413_791).unwrap();
        let offsets = [
            Offset::default(),
            Offset { lat: -0.013, lon: 0.1 },
            Offset { lat: 0.3, lon: -0.7 },
        ];

        for offset in offsets {
            let waypoints = loop_waypoints(start, offset);
            assert_eq!(waypoints.len(), 3);

            let first = waypoints[0];
            let last = waypoints[2];
            assert_eq!(first.lat.to_bits(), last.lat.to_bits());
            assert_eq!(first.lon.to_bits(), last.lon.to_bits());
        }
    }

    #[test]
    fn turnaround_is_start_plus_offset() {
        let start = Coord { lat: 51.0, lon: -1.0 };
        let waypoints = loop_waypoints(start, Offset::default());

        assert_eq!(waypoints[1], Coord { lat: 51.0 + 0.02, lon: -1.0 + 0.05 });
    }

    #[test]
    fn zero_offset_is_not_special_cased() {
        let start = Coord { lat: 10.0, lon: 20.0 };
        let waypoints = loop_waypoints(start, Offset { lat: 0.0, lon: 0.0 });

        assert_eq!(waypoints, vec![start, start, start]);
    }
}
