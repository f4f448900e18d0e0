//! British National Grid (EPSG:27700) to WGS84.
//!
//! OS Names reports positions as easting/northing on the Airy 1830 ellipsoid.
//! The grid position is first unprojected to OSGB36 latitude/longitude with
//! the inverse transverse Mercator series from the Ordnance Survey guide to
//! coordinate systems, then moved onto WGS84 with a seven parameter Helmert
//! transformation. The result is good to a few metres, which is well inside
//! what a walking route needs.

use std::f64::consts::PI;

use super::Coord;

const AIRY_A: f64 = 6_377_563.396;
const AIRY_B: f64 = 6_356_256.909;

const WGS84_A: f64 = 6_378_137.0;
const WGS84_B: f64 = 6_356_752.314_245;

const F0: f64 = 0.999_601_271_7;
const LAT0: f64 = 49.0 * PI / 180.0;
const LON0: f64 = -2.0 * PI / 180.0;
const E0: f64 = 400_000.0;
const N0: f64 = -100_000.0;

// OSGB36 -> WGS84
const TX: f64 = -446.448;
const TY: f64 = 125.157;
const TZ: f64 = -542.060;
const SCALE_PPM: f64 = 20.4894;
const RX_SEC: f64 = -0.1502;
const RY_SEC: f64 = -0.2470;
const RZ_SEC: f64 = -0.8421;

/// Converts a geocoder position to WGS84.
///
/// Values that already fit longitude/latitude bounds are taken to be
/// `(lon, lat)` and returned as they are; anything else is treated as a
/// British National Grid easting/northing pair.
pub fn to_wgs84(x: f64, y: f64) -> Coord {
    if x.abs() <= 180.0 && y.abs() <= 90.0 {
        return Coord { lat: y, lon: x };
    }

    let (lat, lon) = grid_to_osgb36(x, y);
    let (lat, lon) = osgb36_to_wgs84(lat, lon);

    Coord {
        lat: lat.to_degrees(),
        lon: lon.to_degrees(),
    }
}

fn meridional_arc(lat: f64) -> f64 {
    let n = (AIRY_A - AIRY_B) / (AIRY_A + AIRY_B);
    let (n2, n3) = (n * n, n * n * n);
    let d = lat - LAT0;
    let s = lat + LAT0;

    AIRY_B
        * F0
        * ((1.0 + n + 1.25 * n2 + 1.25 * n3) * d
            - (3.0 * n + 3.0 * n2 + 2.625 * n3) * d.sin() * s.cos()
            + (1.875 * n2 + 1.875 * n3) * (2.0 * d).sin() * (2.0 * s).cos()
            - (35.0 / 24.0) * n3 * (3.0 * d).sin() * (3.0 * s).cos())
}

/// Inverse transverse Mercator; returns OSGB36 `(lat, lon)` in radians.
pub(crate) fn grid_to_osgb36(easting: f64, northing: f64) -> (f64, f64) {
    let e2 = 1.0 - (AIRY_B * AIRY_B) / (AIRY_A * AIRY_A);

    let mut lat = LAT0;
    let mut m = 0.0;
    for _ in 0..32 {
        lat += (northing - N0 - m) / (AIRY_A * F0);
        m = meridional_arc(lat);
        if (northing - N0 - m).abs() < 1e-5 {
            break;
        }
    }

    let (sin, cos, tan) = (lat.sin(), lat.cos(), lat.tan());
    let sec = 1.0 / cos;
    let nu = AIRY_A * F0 / (1.0 - e2 * sin * sin).sqrt();
    let rho = AIRY_A * F0 * (1.0 - e2) / (1.0 - e2 * sin * sin).powf(1.5);
    let eta2 = nu / rho - 1.0;

    let (t2, t4, t6) = (tan * tan, tan.powi(4), tan.powi(6));

    let vii = tan / (2.0 * rho * nu);
    let viii = tan / (24.0 * rho * nu.powi(3)) * (5.0 + 3.0 * t2 + eta2 - 9.0 * t2 * eta2);
    let ix = tan / (720.0 * rho * nu.powi(5)) * (61.0 + 90.0 * t2 + 45.0 * t4);
    let x = sec / nu;
    let xi = sec / (6.0 * nu.powi(3)) * (nu / rho + 2.0 * t2);
    let xii = sec / (120.0 * nu.powi(5)) * (5.0 + 28.0 * t2 + 24.0 * t4);
    let xiia = sec / (5040.0 * nu.powi(7)) * (61.0 + 662.0 * t2 + 1320.0 * t4 + 720.0 * t6);

    let de = easting - E0;

    let lat = lat - vii * de.powi(2) + viii * de.powi(4) - ix * de.powi(6);
    let lon = LON0 + x * de - xi * de.powi(3) + xii * de.powi(5) - xiia * de.powi(7);

    (lat, lon)
}

fn osgb36_to_wgs84(lat: f64, lon: f64) -> (f64, f64) {
    let e2 = 1.0 - (AIRY_B * AIRY_B) / (AIRY_A * AIRY_A);
    let nu = AIRY_A / (1.0 - e2 * lat.sin().powi(2)).sqrt();

    let x1 = nu * lat.cos() * lon.cos();
    let y1 = nu * lat.cos() * lon.sin();
    let z1 = (1.0 - e2) * nu * lat.sin();

    let s = SCALE_PPM * 1e-6;
    let to_rad = |sec: f64| (sec / 3600.0).to_radians();
    let (rx, ry, rz) = (to_rad(RX_SEC), to_rad(RY_SEC), to_rad(RZ_SEC));

    let x2 = TX + (1.0 + s) * x1 - rz * y1 + ry * z1;
    let y2 = TY + rz * x1 + (1.0 + s) * y1 - rx * z1;
    let z2 = TZ - ry * x1 + rx * y1 + (1.0 + s) * z1;

    let e2 = 1.0 - (WGS84_B * WGS84_B) / (WGS84_A * WGS84_A);
    let p = (x2 * x2 + y2 * y2).sqrt();

    let mut lat = z2.atan2(p * (1.0 - e2));
    for _ in 0..16 {
        let nu = WGS84_A / (1.0 - e2 * lat.sin().powi(2)).sqrt();
        let next = (z2 + e2 * nu * lat.sin()).atan2(p);
        if (next - lat).abs() < 1e-12 {
            lat = next;
            break;
        }
        lat = next;
    }

    (lat, y2.atan2(x2))
}
