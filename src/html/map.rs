use geojson::FeatureCollection;

use super::{escape_script, escape_text};
use crate::geo::Coord;

const OS_TILES: &str = "https://api.os.uk/maps/raster/v1/zxy/Light_3857/{z}/{x}/{y}.png?key=";
const OSM_TILES: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Raster tile layer drawn under the route.
#[derive(Clone, Debug, PartialEq)]
pub enum TileSource {
    /// Ordnance Survey Maps API; the key ends up in the page.
    Os { key: String },
    OpenStreetMap,
}

impl TileSource {
    fn url(&self) -> String {
        match self {
            TileSource::Os { key } => format!("{OS_TILES}{key}"),
            TileSource::OpenStreetMap => OSM_TILES.to_string(),
        }
    }

    fn attribution(&self) -> &'static str {
        match self {
            TileSource::Os { .. } => "&copy; Crown copyright and database rights Ordnance Survey",
            TileSource::OpenStreetMap => "&copy; OpenStreetMap contributors",
        }
    }
}

pub struct MapPage<'a> {
    pub title: &'a str,
    pub start: Coord,
    pub route: &'a FeatureCollection,
    /// Drawn as markers; may be empty.
    pub markers: &'a [Coord],
    pub tiles: &'a TileSource,
}

/// Renders a standalone Leaflet page showing the route.
pub fn render_map(page: &MapPage) -> Result<String, serde_json::Error> {
    let route = escape_script(&serde_json::to_string(page.route)?);
    let markers: Vec<[f64; 2]> = page.markers.iter().map(|c| [c.lat, c.lon]).collect();
    let markers = escape_script(&serde_json::to_string(&markers)?);
    let tile_url = escape_script(&serde_json::to_string(&page.tiles.url())?);
    let attribution = serde_json::to_string(page.tiles.attribution())?;
    let title = escape_text(page.title);

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8" />
  <title>{title}</title>
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css"/>
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
  <style>
    html, body {{ height: 100%; margin: 0; }}
    #map {{ width: 100%; height: 100vh; }}
  </style>
</head>
<body>
  <div id="map"></div>
  <script>
    const startLat = {start_lat};
    const startLon = {start_lon};
    const route = {route};
    const waypoints = {markers};

    const map = L.map('map').setView([startLat, startLon], 13);
    L.tileLayer({tile_url}, {{ attribution: {attribution}, maxZoom: 19 }}).addTo(map);

    const layer = L.geoJSON(route, {{ style: {{ color: 'blue', weight: 4 }} }}).addTo(map);
    waypoints.forEach(pt => L.marker(pt).addTo(map));

    try {{
      const bounds = layer.getBounds();
      if (bounds && bounds.isValid()) {{
        map.fitBounds(bounds.pad(0.1));
      }}
    }} catch (e) {{}}
  </script>
</body>
</html>
"#,
        start_lat = page.start.lat,
        start_lon = page.start.lon,
    ))
}
