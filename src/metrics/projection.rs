//! Transverse Mercator projection for planar area work.

use geo::{Coord, MapCoords, MultiPolygon};

/// Forward transverse Mercator on a reference ellipsoid (Snyder's series).
#[derive(Debug, Clone, Copy)]
pub struct TransverseMercator {
    /// Semi-major axis, meters.
    pub semi_major: f64,
    /// Ellipsoid flattening.
    pub flattening: f64,
    /// Central meridian, degrees.
    pub central_meridian: f64,
    /// Scale factor at the central meridian.
    pub scale: f64,
    pub false_easting: f64,
    pub false_northing: f64,
}

/// TWD97 TM2 (EPSG:3826), the planar system for Taiwan proper: GRS80
/// ellipsoid, central meridian 121°E, scale 0.9999, false easting 250 km.
pub const TWD97_TM2: TransverseMercator = TransverseMercator {
    semi_major: 6_378_137.0,
    flattening: 1.0 / 298.257_222_101,
    central_meridian: 121.0,
    scale: 0.9999,
    false_easting: 250_000.0,
    false_northing: 0.0,
};

impl TransverseMercator {
    /// Project a geographic coordinate (degrees) to planar meters.
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let phi = lat.to_radians();
        let dlam = (lon - self.central_meridian).to_radians();

        let e2 = self.flattening * (2.0 - self.flattening);
        let ep2 = e2 / (1.0 - e2);

        let sin_phi = phi.sin();
        let cos_phi = phi.cos();

        let n = self.semi_major / (1.0 - e2 * sin_phi * sin_phi).sqrt();
        let t = (sin_phi / cos_phi).powi(2);
        let c = ep2 * cos_phi * cos_phi;
        let a = dlam * cos_phi;

        let m = self.meridian_arc(phi);

        let a2 = a * a;
        let a3 = a2 * a;
        let a4 = a2 * a2;
        let a5 = a4 * a;
        let a6 = a4 * a2;

        let x = self.false_easting
            + self.scale
                * n
                * (a
                    + (1.0 - t + c) * a3 / 6.0
                    + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a5 / 120.0);

        let y = self.false_northing
            + self.scale
                * (m + n
                    * phi.tan()
                    * (a2 / 2.0
                        + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                        + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a6 / 720.0));

        (x, y)
    }

    /// Meridian arc length from the equator.
    fn meridian_arc(&self, phi: f64) -> f64 {
        let e2 = self.flattening * (2.0 - self.flattening);
        let e4 = e2 * e2;
        let e6 = e4 * e2;

        self.semi_major
            * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
                - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
                + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
                - (35.0 * e6 / 3072.0) * (6.0 * phi).sin())
    }

    /// Reproject a whole geometry.
    pub fn project_geometry(&self, geometry: &MultiPolygon<f64>) -> MultiPolygon<f64> {
        geometry.map_coords(|Coord { x, y }| {
            let (px, py) = self.project(x, y);
            Coord { x: px, y: py }
        })
    }
}
