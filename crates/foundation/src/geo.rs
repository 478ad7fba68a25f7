/// Geographic coordinate in degrees, GeoJSON axis order (`[lng, lat]`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    pub fn offset(self, d_lng: f64, d_lat: f64) -> Self {
        Self::new(self.lng + d_lng, self.lat + d_lat)
    }

    pub fn is_finite(self) -> bool {
        self.lng.is_finite() && self.lat.is_finite()
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

impl From<[f64; 2]> for LngLat {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

/// Closed or open linear ring. A closing duplicate vertex is tolerated.
pub type Ring = Vec<LngLat>;

/// Outer ring first, holes after.
pub type Polygon = Vec<Ring>;

#[cfg(test)]
mod tests {
    use super::LngLat;

    #[test]
    fn offset_moves_both_axes() {
        let p = LngLat::new(-98.5, 39.8).offset(1.0, -0.5);
        assert_eq!(p, LngLat::new(-97.5, 39.3));
        assert_eq!(p.to_array(), [-97.5, 39.3]);
    }

    #[test]
    fn rejects_non_finite() {
        assert!(!LngLat::new(f64::NAN, 0.0).is_finite());
        assert!(LngLat::from([1.0, 2.0]).is_finite());
    }
}
