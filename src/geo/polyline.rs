//! Decoder for the encoded polyline format used by openrouteservice's JSON
//! directions responses.

use thiserror::Error;

use super::Coord;

pub const ORS_PRECISION: u32 = 5;
/// Some deployments encode with six decimal places instead of five.
pub const FALLBACK_PRECISION: u32 = 6;

#[derive(Error, Debug, PartialEq)]
pub enum DecodeError {
    #[error("invalid polyline character {0:?} at byte {1}")]
    InvalidChar(char, usize),

    #[error("polyline ends in the middle of a value")]
    Truncated,

    #[error("polyline value overflows at byte {0}")]
    Overflow(usize),

    #[error("decoded position lat={lat}, lon={lon} is out of range")]
    OutOfRange { lat: f64, lon: f64 },
}

/// Decodes `encoded` into an ordered list of coordinates.
pub fn decode(encoded: &str, precision: u32) -> Result<Vec<Coord>, DecodeError> {
    let factor = 10_f64.powi(precision as i32);
    let bytes = encoded.as_bytes();

    let mut coords = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;

    while index < bytes.len() {
        lat = lat
            .checked_add(next_value(bytes, &mut index)?)
            .ok_or(DecodeError::Overflow(index))?;
        lon = lon
            .checked_add(next_value(bytes, &mut index)?)
            .ok_or(DecodeError::Overflow(index))?;

        coords.push(Coord {
            lat: lat as f64 / factor,
            lon: lon as f64 / factor,
        });
    }

    Ok(coords)
}

/// Decodes a route geometry at precision 5, retrying at precision 6 when
/// the first pass fails or lands outside WGS84 bounds.
pub fn decode_route(encoded: &str) -> Result<Vec<Coord>, DecodeError> {
    decode_in_range(encoded, ORS_PRECISION).or_else(|e| {
        log::debug!("polyline at precision {ORS_PRECISION} rejected ({e}), retrying");
        decode_in_range(encoded, FALLBACK_PRECISION)
    })
}

fn decode_in_range(encoded: &str, precision: u32) -> Result<Vec<Coord>, DecodeError> {
    let coords = decode(encoded, precision)?;

    match coords.iter().find(|c| Coord::new(c.lat, c.lon).is_err()) {
        Some(c) => Err(DecodeError::OutOfRange { lat: c.lat, lon: c.lon }),
        None => Ok(coords),
    }
}

fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, DecodeError> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes.get(*index).ok_or(DecodeError::Truncated)?;
        if !(63..127).contains(&byte) || shift > 60 {
            return Err(DecodeError::InvalidChar(byte as char, *index));
        }
        *index += 1;

        let chunk = (byte - 63) as i64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 == 1 { !(result >> 1) } else { result >> 1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_reference_polyline() {
        let coords = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@", 5).unwrap();

        assert_eq!(
            coords,
            vec![
                Coord { lat: 38.5, lon: -120.2 },
                Coord { lat: 40.7, lon: -120.95 },
                Coord { lat: 43.252, lon: -126.453 },
            ]
        );
    }

    #[test]
    fn empty_input_has_no_points() {
        assert_eq!(decode("", 5).unwrap(), vec![]);
    }

    #[test]
    fn rejects_truncated_input() {
        // A latitude with no longitude.
        assert_eq!(decode("_p~iF", 5), Err(DecodeError::Truncated));
        assert_eq!(decode("_p~iF~ps|", 5), Err(DecodeError::Truncated));
    }

    #[test]
    fn rejects_characters_outside_the_alphabet() {
        assert_eq!(decode("_p~iF ps|U", 5), Err(DecodeError::InvalidChar(' ', 5)));
    }

    #[test]
    fn accumulated_overflow_is_an_error() {
        let encoded = "}~~~~~~~~~~~F".repeat(6);

        assert!(matches!(decode(&encoded, 5), Err(DecodeError::Overflow(_))));
        assert!(decode_route(&encoded).is_err());
    }

    #[test]
    fn route_decoding_keeps_precision_five_when_in_range() {
        assert_eq!(
            decode_route("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap(),
            decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@", 5).unwrap()
        );
    }

    #[test]
    fn route_decoding_falls_back_to_precision_six() {
        // lat 50.909, lon -1.404 at six decimal places reads as lat 509.09
        // at five, which is out of range.
        let encoded = "osfb`B~dutA";
        assert!(decode(encoded, 5).unwrap()[0].lat > 90.0);

        let coords = decode_route(encoded).unwrap();
        assert_eq!(coords.len(), 1);
        assert!((coords[0].lat - 50.909).abs() < 1e-9);
        assert!((coords[0].lon + 1.404).abs() < 1e-9);
    }
}
