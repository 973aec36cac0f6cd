//! GPX track point extraction
//!
//! Reitti's export is GPX 1.1. Only coordinates matter here; elevation,
//! time and extensions are skipped. Both `<trkpt>` track points and
//! `<wpt>` waypoints contribute, in document order.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::OverlayError;

/// One latitude/longitude pair from a GPX file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Parse every track point and waypoint out of a GPX document.
///
/// Points with missing or malformed lat/lon attributes are skipped;
/// malformed XML itself is an error. Non-GPX XML simply yields no points.
pub fn parse_gpx_points(xml: &[u8]) -> Result<Vec<TrackPoint>, OverlayError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut points = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            // Points appear both self-closed and with children (ele, time)
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let name = e.local_name();
                if name.as_ref() == b"trkpt" || name.as_ref() == b"wpt" {
                    if let Some(point) = point_from_attributes(&e) {
                        points.push(point);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(OverlayError::Parse(format!("XML error: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    Ok(points)
}

/// Read lat/lon off a trkpt/wpt element, if both parse
fn point_from_attributes(element: &BytesStart<'_>) -> Option<TrackPoint> {
    let mut lat = None;
    let mut lon = None;

    for attr in element.attributes().filter_map(|a| a.ok()) {
        let value = String::from_utf8_lossy(&attr.value);
        match attr.key.local_name().as_ref() {
            b"lat" => lat = value.parse::<f64>().ok(),
            b"lon" => lon = value.parse::<f64>().ok(),
            _ => {}
        }
    }

    Some(TrackPoint {
        lat: lat?,
        lon: lon?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_GPX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="reitti" xmlns="http://www.topografix.com/GPX/1/1">
  <wpt lat="60.1699" lon="24.9384"><name>start</name></wpt>
  <trk>
    <name>2020-11-06</name>
    <trkseg>
      <trkpt lat="60.1700" lon="24.9390">
        <ele>12.0</ele>
        <time>2020-11-06T08:00:00Z</time>
      </trkpt>
      <trkpt lat="60.1710" lon="24.9400"/>
    </trkseg>
  </trk>
</gpx>"#;

    #[test]
    fn test_parses_waypoints_and_trackpoints_in_order() {
        let points = parse_gpx_points(SAMPLE_GPX.as_bytes()).unwrap();

        assert_eq!(
            points,
            vec![
                TrackPoint { lat: 60.1699, lon: 24.9384 },
                TrackPoint { lat: 60.1700, lon: 24.9390 },
                TrackPoint { lat: 60.1710, lon: 24.9400 },
            ]
        );
    }

    #[test]
    fn test_malformed_coordinates_are_skipped() {
        let gpx = r#"<gpx>
            <trkseg>
              <trkpt lat="not-a-number" lon="24.9"/>
              <trkpt lat="60.2" lon="24.95"/>
              <trkpt lon="24.9"/>
            </trkseg>
        </gpx>"#;

        let points = parse_gpx_points(gpx.as_bytes()).unwrap();

        assert_eq!(points, vec![TrackPoint { lat: 60.2, lon: 24.95 }]);
    }

    #[test]
    fn test_non_gpx_xml_yields_no_points() {
        let points = parse_gpx_points(b"<rss><item>hello</item></rss>").unwrap();

        assert!(points.is_empty());
    }

    #[test]
    fn test_broken_xml_is_an_error() {
        let result = parse_gpx_points(b"<gpx><trkpt lat=\"60\" lon=");

        assert!(matches!(result, Err(OverlayError::Parse(_))));
    }
}
