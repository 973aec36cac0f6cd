//! Leaflet map rendering
//!
//! Produces one self-contained HTML page: a full-screen map with a colored
//! polyline per year, a legend, an info box and bounds fitted to all
//! tracks. There is no build step: the page pulls Leaflet from a CDN
//! and everything else is inlined.

use super::gpx::TrackPoint;

/// One year's track for the overlay
#[derive(Debug, Clone, PartialEq)]
pub struct YearTrack {
    pub year: i32,
    pub points: Vec<TrackPoint>,
}

/// Bright, high-contrast palette; years cycle through it in order
const PALETTE: [&str; 15] = [
    "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF", "#00FFFF", "#FF8800", "#8800FF",
    "#FF0088", "#00FF88", "#88FF00", "#0088FF", "#FF6600", "#6600FF", "#FF0066",
];

/// File name for the rendered overlay, e.g. "path_overlay_11-06_2012-2025.html"
pub fn overlay_filename(month_day: &str, start_year: i32, end_year: i32) -> String {
    format!("path_overlay_{}_{}-{}.html", month_day, start_year, end_year)
}

/// Render the overlay page for the given tracks.
///
/// `tracks` must be non-empty and sorted by year; output is deterministic
/// for identical input.
pub fn render_overlay_map(tracks: &[YearTrack], month_day: &str) -> String {
    let total_points: usize = tracks.iter().map(|t| t.points.len()).sum();
    let (center_lat, center_lon) = center_of(tracks, total_points);

    let mut polylines = String::new();
    let mut legend_items = String::new();
    let mut group_layers = String::new();

    for (index, track) in tracks.iter().enumerate() {
        let color = PALETTE[index % PALETTE.len()];
        let coords: Vec<String> = track
            .points
            .iter()
            .map(|p| format!("[{}, {}]", p.lat, p.lon))
            .collect();

        polylines.push_str(&format!(
            r#"        // Path for {year}
        var path{year} = L.polyline([{coords}], {{
            color: '{color}',
            weight: 5,
            opacity: 0.9
        }}).addTo(map).bindPopup('{year}: {count} points');

        map.on('zoomend', function() {{
            var zoom = map.getZoom();
            var weight = zoom < 10 ? 8 : (zoom < 13 ? 5 : 3);
            path{year}.setStyle({{ weight: weight }});
        }});

"#,
            year = track.year,
            coords = coords.join(", "),
            color = color,
            count = track.points.len(),
        ));

        legend_items.push_str(&format!(
            "        <div><span style=\"color: {}; font-weight: bold; font-size: 20px;\">■</span> {} ({} points)</div>\n",
            color,
            track.year,
            track.points.len(),
        ));

        group_layers.push_str(&format!("group.addLayer(path{});\n        ", track.year));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Multi-Year Path Overlay - {month_day}</title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
    <style>
        body {{ margin: 0; font-family: Arial, sans-serif; }}
        #map {{ height: 100vh; width: 100%; }}
        .legend {{
            position: absolute;
            top: 10px;
            right: 10px;
            background: white;
            padding: 15px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.3);
            z-index: 1000;
            max-height: 80vh;
            overflow-y: auto;
        }}
        .legend h3 {{
            margin: 0 0 10px 0;
            font-size: 16px;
        }}
        .legend div {{
            margin: 5px 0;
            font-size: 14px;
        }}
        .info {{
            position: absolute;
            bottom: 10px;
            left: 10px;
            background: white;
            padding: 10px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.3);
            z-index: 1000;
        }}
    </style>
</head>
<body>
    <div id="map"></div>
    <div class="legend">
        <h3>Paths for {month_day}</h3>
{legend_items}    </div>
    <div class="info">
        <strong>Date:</strong> {month_day}<br>
        <strong>Years with Data:</strong> {year_count}<br>
        <strong>Total Points:</strong> {total_points}
    </div>

    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
    <script>
        // Initialize map
        var map = L.map('map').setView([{center_lat}, {center_lon}], 13);

        // Light greyscale tiles keep the colored paths readable
        L.tileLayer('https://{{s}}.basemaps.cartocdn.com/light_all/{{z}}/{{x}}/{{y}}{{r}}.png', {{
            attribution: '&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors &copy; <a href="https://carto.com/attributions">CARTO</a>',
            subdomains: 'abcd',
            maxZoom: 20
        }}).addTo(map);

{polylines}
        // Fit map to all paths
        var group = new L.featureGroup();
        {group_layers}map.fitBounds(group.getBounds().pad(0.1));
    </script>
</body>
</html>
"#,
        month_day = month_day,
        legend_items = legend_items,
        year_count = tracks.len(),
        total_points = total_points,
        center_lat = center_lat,
        center_lon = center_lon,
        polylines = polylines,
        group_layers = group_layers,
    )
}

/// Mean of all coordinates across all tracks
fn center_of(tracks: &[YearTrack], total_points: usize) -> (f64, f64) {
    let mut lat_sum = 0.0;
    let mut lon_sum = 0.0;
    for track in tracks {
        for point in &track.points {
            lat_sum += point.lat;
            lon_sum += point.lon;
        }
    }

    let n = total_points.max(1) as f64;
    (lat_sum / n, lon_sum / n)
}
