//! Chaikin corner cutting on a closed ring.

use crate::error::BoundaryError;
use crate::models::GeoPoint;

fn lerp(a: GeoPoint, b: GeoPoint, t: f64) -> GeoPoint {
    GeoPoint::new(a.lat + (b.lat - a.lat) * t, a.lng + (b.lng - a.lng) * t)
}

/// One corner-cutting pass. `ring` is open; the wrap-around edge is included.
fn cut_corners(ring: &[GeoPoint]) -> Vec<GeoPoint> {
    let n = ring.len();
    let mut out = Vec::with_capacity(n * 2);

    for i in 0..n {
        let p0 = ring[i];
        let p1 = ring[(i + 1) % n];
        out.push(lerp(p0, p1, 0.25));
        out.push(lerp(p0, p1, 0.75));
    }

    out
}

/// Smooth an open ring with `iterations` corner-cutting passes.
///
/// The output has exactly `ring.len() * 2^iterations` points and is still
/// open.
pub fn smooth(ring: &[GeoPoint], iterations: u32) -> Result<Vec<GeoPoint>, BoundaryError> {
    if ring.len() < 3 {
        return Err(BoundaryError::DegenerateRing { points: ring.len() });
    }

    let mut current = ring.to_vec();
    for _ in 0..iterations {
        current = cut_corners(&current);
    }

    Ok(current)
}
