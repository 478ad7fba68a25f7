//! Planar polygon math in lon/lat degrees.
//!
//! Good enough for label anchors and hit testing at state/county scale; the
//! map library owns the real projection.

use crate::geo::{LngLat, Polygon, Ring};

/// Shoelace signed area. Positive for counter-clockwise rings.
pub fn ring_signed_area(ring: &[LngLat]) -> f64 {
    let pts = open_ring(ring);
    if pts.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..pts.len() {
        let a = pts[i];
        let b = pts[(i + 1) % pts.len()];
        acc += a.lng * b.lat - b.lng * a.lat;
    }
    acc * 0.5
}

/// Outer area minus holes, always non-negative.
pub fn polygon_area(polygon: &[Ring]) -> f64 {
    let mut rings = polygon.iter();
    let Some(outer) = rings.next() else {
        return 0.0;
    };
    let holes: f64 = rings.map(|r| ring_signed_area(r).abs()).sum();
    (ring_signed_area(outer).abs() - holes).max(0.0)
}

pub fn multipolygon_area(polygons: &[Polygon]) -> f64 {
    polygons.iter().map(|p| polygon_area(p)).sum()
}

/// Area-weighted centroid across all polygons (holes subtract).
///
/// Degenerate inputs (zero area) fall back to the mean of the outer-ring
/// vertices. Returns `None` when there are no finite vertices.
pub fn center_of_mass(polygons: &[Polygon]) -> Option<LngLat> {
    let mut sum_a = 0.0;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;

    for polygon in polygons {
        for (ring_i, ring) in polygon.iter().enumerate() {
            let (a, cx, cy) = ring_moments(ring);
            // Holes take the opposite sign of the outer ring regardless of winding.
            let sign = if ring_i == 0 { 1.0 } else { -1.0 };
            let a_abs = a.abs() * sign;
            if a != 0.0 {
                sum_a += a_abs;
                sum_x += cx * a_abs;
                sum_y += cy * a_abs;
            }
        }
    }

    if sum_a.abs() > 1e-12 {
        let c = LngLat::new(sum_x / sum_a, sum_y / sum_a);
        if c.is_finite() {
            return Some(c);
        }
    }
    vertex_mean(polygons)
}

fn ring_moments(ring: &[LngLat]) -> (f64, f64, f64) {
    let pts = open_ring(ring);
    if pts.len() < 3 {
        return (0.0, 0.0, 0.0);
    }
    let mut a2 = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..pts.len() {
        let p = pts[i];
        let q = pts[(i + 1) % pts.len()];
        let cross = p.lng * q.lat - q.lng * p.lat;
        a2 += cross;
        cx += (p.lng + q.lng) * cross;
        cy += (p.lat + q.lat) * cross;
    }
    if a2 == 0.0 {
        return (0.0, 0.0, 0.0);
    }
    (a2 * 0.5, cx / (3.0 * a2), cy / (3.0 * a2))
}

fn vertex_mean(polygons: &[Polygon]) -> Option<LngLat> {
    let mut n = 0.0_f64;
    let mut sx = 0.0;
    let mut sy = 0.0;
    for outer in polygons.iter().filter_map(|p| p.first()) {
        for v in open_ring(outer) {
            if v.is_finite() {
                sx += v.lng;
                sy += v.lat;
                n += 1.0;
            }
        }
    }
    (n > 0.0).then(|| LngLat::new(sx / n, sy / n))
}

/// Even-odd crossing test against a single ring.
pub fn point_in_ring(p: LngLat, ring: &[LngLat]) -> bool {
    let pts = open_ring(ring);
    if pts.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = pts.len() - 1;
    for i in 0..pts.len() {
        let a = pts[i];
        let b = pts[j];
        if (a.lat > p.lat) != (b.lat > p.lat) {
            let x = (b.lng - a.lng) * (p.lat - a.lat) / (b.lat - a.lat) + a.lng;
            if p.lng < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Inside the outer ring and outside every hole.
pub fn point_in_polygon(p: LngLat, polygon: &[Ring]) -> bool {
    let mut rings = polygon.iter();
    let Some(outer) = rings.next() else {
        return false;
    };
    point_in_ring(p, outer) && !rings.any(|hole| point_in_ring(p, hole))
}

pub fn point_in_multipolygon(p: LngLat, polygons: &[Polygon]) -> bool {
    polygons.iter().any(|poly| point_in_polygon(p, poly))
}

fn open_ring(ring: &[LngLat]) -> &[LngLat] {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() >= 2 && first == last => &ring[..ring.len() - 1],
        _ => ring,
    }
}
