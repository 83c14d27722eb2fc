//! GPS position from photo EXIF metadata

use std::io::Cursor;

use exif::{Exif, In, Reader, Tag, Value};
use truckmap_types::Coordinate;

/// Read the GPS position embedded in an image, if it has one
pub fn gps_location(bytes: &[u8]) -> Option<Coordinate> {
    let exif = Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()?;

    let lat = extract_gps_coord(&exif, Tag::GPSLatitude, Tag::GPSLatitudeRef)?;
    let lng = extract_gps_coord(&exif, Tag::GPSLongitude, Tag::GPSLongitudeRef)?;
    let at = Coordinate::new(lat, lng);
    // 0,0 is what some cameras write when they have no fix
    (at.is_valid() && (lat != 0.0 || lng != 0.0)).then_some(at)
}

/// Degrees/minutes/seconds rationals plus an N/S or E/W reference
fn extract_gps_coord(exif: &Exif, coord_tag: Tag, ref_tag: Tag) -> Option<f64> {
    let coord_field = exif.get_field(coord_tag, In::PRIMARY)?;
    let ref_field = exif.get_field(ref_tag, In::PRIMARY)?;

    let degrees = match coord_field.value {
        Value::Rational(ref parts) if parts.len() >= 3 => {
            dms_to_degrees(parts[0].to_f64(), parts[1].to_f64(), parts[2].to_f64())
        }
        _ => return None,
    };

    let reference = ref_field.display_value().to_string();
    Some(apply_reference(degrees, &reference))
}

fn dms_to_degrees(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + minutes / 60.0 + seconds / 3600.0
}

fn apply_reference(degrees: f64, reference: &str) -> f64 {
    if reference.contains('S') || reference.contains('W') {
        -degrees
    } else {
        degrees
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exif::experimental::Writer;
    use exif::{Field, Rational};

    fn dms(d: u32, m: u32, centiseconds: u32) -> Value {
        Value::Rational(vec![
            Rational::from((d, 1)),
            Rational::from((m, 1)),
            Rational::from((centiseconds, 100)),
        ])
    }

    fn ascii(text: &str) -> Value {
        Value::Ascii(vec![text.as_bytes().to_vec()])
    }

    /// A bare TIFF carrying only GPS tags
    fn tiff_with_gps(lat: Value, lat_ref: &str, lng: Value, lng_ref: &str) -> Vec<u8> {
        let fields = [
            (Tag::GPSLatitudeRef, ascii(lat_ref)),
            (Tag::GPSLatitude, lat),
            (Tag::GPSLongitudeRef, ascii(lng_ref)),
            (Tag::GPSLongitude, lng),
        ]
        .map(|(tag, value)| Field {
            tag,
            ifd_num: In::PRIMARY,
            value,
        });

        let mut writer = Writer::new();
        for field in &fields {
            writer.push_field(field);
        }
        let mut buf = Cursor::new(Vec::new());
        writer.write(&mut buf, false).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_dms_to_degrees() {
        let deg = dms_to_degrees(34.0, 3.0, 7.92);
        assert!((deg - 34.0522).abs() < 1e-6);
    }

    #[test]
    fn test_apply_reference() {
        assert_eq!(apply_reference(118.0, "W"), -118.0);
        assert_eq!(apply_reference(34.0, "N"), 34.0);
        assert_eq!(apply_reference(33.0, "S"), -33.0);
    }

    #[test]
    fn test_no_exif_yields_none() {
        assert!(gps_location(b"plain bytes").is_none());
    }

    #[test]
    fn test_gps_tags_give_signed_coordinate() {
        let bytes = tiff_with_gps(dms(34, 3, 792), "N", dms(118, 14, 3732), "W");
        let at = gps_location(&bytes).unwrap();
        assert!((at.lat - 34.0522).abs() < 1e-6);
        assert!((at.lng + 118.2437).abs() < 1e-6);
    }

    #[test]
    fn test_zero_gps_fix_is_ignored() {
        let bytes = tiff_with_gps(dms(0, 0, 0), "N", dms(0, 0, 0), "E");
        assert!(gps_location(&bytes).is_none());
    }
}
