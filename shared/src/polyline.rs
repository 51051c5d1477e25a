//! Encoded polyline codec (signed delta, 5-bit chunks offset by 63, 1e5 scale).

use thiserror::Error;

use crate::Coordinate;

const PRECISION: f64 = 1e5;
const CHUNK_OFFSET: u8 = 63;
const MAX_CHUNKS: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    #[error("unexpected end of path inside the value starting at byte {0}")]
    Truncated(usize),
    #[error("byte {byte:#04x} at offset {offset} is outside the polyline alphabet")]
    InvalidByte { offset: usize, byte: u8 },
    #[error("value starting at byte {0} does not fit a coordinate")]
    Overflow(usize),
}

/// Decodes an encoded path into its points. The empty string is an empty path.
pub fn decode(path: &str) -> Result<Vec<Coordinate>, PolylineError> {
    let bytes = path.as_bytes();
    let mut coordinates = Vec::new();
    let mut cursor = 0;
    let (mut lat, mut lng) = (0i64, 0i64);

    while cursor < bytes.len() {
        lat += read_value(bytes, &mut cursor)?;
        lng += read_value(bytes, &mut cursor)?;
        coordinates.push(Coordinate {
            lat: lat as f64 / PRECISION,
            lng: lng as f64 / PRECISION,
        });
    }

    Ok(coordinates)
}

fn read_value(bytes: &[u8], cursor: &mut usize) -> Result<i64, PolylineError> {
    let start = *cursor;
    let mut result = 0i64;
    let mut chunks = 0;

    loop {
        let Some(&raw) = bytes.get(*cursor) else {
            return Err(PolylineError::Truncated(start));
        };
        if !(CHUNK_OFFSET..=CHUNK_OFFSET + 63).contains(&raw) {
            return Err(PolylineError::InvalidByte {
                offset: *cursor,
                byte: raw,
            });
        }
        if chunks == MAX_CHUNKS {
            return Err(PolylineError::Overflow(start));
        }
        *cursor += 1;

        let chunk = i64::from(raw - CHUNK_OFFSET);
        result |= (chunk & 0x1f) << (5 * chunks);
        chunks += 1;
        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

/// Encodes `points`. Coordinates outside the latitude/longitude range are
/// clamped to it and NaN encodes as 0, so every output decodes.
pub fn encode(points: &[Coordinate]) -> String {
    let mut encoded = String::with_capacity(points.len() * 8);
    let (mut prev_lat, mut prev_lng) = (0i64, 0i64);

    for point in points {
        let lat = scale(point.lat, 90.0);
        let lng = scale(point.lng, 180.0);
        write_value(lat - prev_lat, &mut encoded);
        write_value(lng - prev_lng, &mut encoded);
        prev_lat = lat;
        prev_lng = lng;
    }

    encoded
}

fn scale(degrees: f64, limit: f64) -> i64 {
    if degrees.is_nan() {
        return 0;
    }
    (degrees.clamp(-limit, limit) * PRECISION).round() as i64
}

fn write_value(delta: i64, out: &mut String) {
    let mut value = if delta < 0 { !(delta << 1) } else { delta << 1 };
    while value >= 0x20 {
        out.push(char::from((0x20 | (value & 0x1f)) as u8 + CHUNK_OFFSET));
        value >>= 5;
    }
    out.push(char::from(value as u8 + CHUNK_OFFSET));
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE_PATH: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn close(a: Coordinate, lat: f64, lng: f64) -> bool {
        (a.lat - lat).abs() < 1e-9 && (a.lng - lng).abs() < 1e-9
    }

    #[test]
    fn decodes_reference_path() {
        let points = decode(REFERENCE_PATH).unwrap();
        assert_eq!(points.len(), 3);
        assert!(close(points[0], 38.5, -120.2));
        assert!(close(points[1], 40.7, -120.95));
        assert!(close(points[2], 43.252, -126.453));
    }

    #[test]
    fn encodes_reference_path() {
        let points = [
            Coordinate { lat: 38.5, lng: -120.2 },
            Coordinate { lat: 40.7, lng: -120.95 },
            Coordinate { lat: 43.252, lng: -126.453 },
        ];
        assert_eq!(encode(&points), REFERENCE_PATH);
    }

    #[test]
    fn empty_path_is_empty() {
        assert!(decode("").unwrap().is_empty());
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn dangling_latitude_is_truncated() {
        // "_p~iF" is a complete latitude with no longitude after it.
        assert_eq!(decode("_p~iF"), Err(PolylineError::Truncated(5)));
    }

    #[test]
    fn unterminated_chunk_is_truncated() {
        assert_eq!(decode("_p~"), Err(PolylineError::Truncated(0)));
    }

    #[test]
    fn rejects_bytes_outside_alphabet() {
        let err = decode("_p~iF ps|U").unwrap_err();
        assert_eq!(
            err,
            PolylineError::InvalidByte {
                offset: 5,
                byte: b' '
            }
        );
    }

    #[test]
    fn rejects_overlong_values() {
        assert_eq!(decode("~~~~~~~~~?"), Err(PolylineError::Overflow(0)));
    }

    #[test]
    fn encode_clamps_values_outside_the_globe() {
        let wild = [
            Coordinate { lat: f64::NAN, lng: f64::INFINITY },
            Coordinate { lat: 1e300, lng: f64::NEG_INFINITY },
            Coordinate { lat: -1e300, lng: f64::NAN },
        ];
        let decoded = decode(&encode(&wild)).unwrap();
        assert!(close(decoded[0], 0.0, 180.0));
        assert!(close(decoded[1], 90.0, -180.0));
        assert!(close(decoded[2], -90.0, 0.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn valid_coord() -> impl Strategy<Value = Coordinate> {
            (-90.0..=90.0, -180.0..=180.0).prop_map(|(lat, lng)| Coordinate { lat, lng })
        }

        proptest! {
            #[test]
            fn prop_decoded_points_stay_within_half_a_unit(
                coords in prop::collection::vec(valid_coord(), 0..20)
            ) {
                let decoded = decode(&encode(&coords)).unwrap();
                prop_assert_eq!(decoded.len(), coords.len());
                for (original, back) in coords.iter().zip(&decoded) {
                    prop_assert!((original.lat - back.lat).abs() <= 0.5e-5 + 1e-9);
                    prop_assert!((original.lng - back.lng).abs() <= 0.5e-5 + 1e-9);
                }
            }

            #[test]
            fn prop_decode_never_panics(raw in "\\PC{0,40}") {
                let _ = decode(&raw);
            }
        }
    }
}
