use crate::geo::LngLat;

/// Axis-aligned lon/lat bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LngLatBounds {
    pub min: LngLat,
    pub max: LngLat,
}

impl LngLatBounds {
    pub const fn new(min: LngLat, max: LngLat) -> Self {
        LngLatBounds { min, max }
    }

    /// Empty box; any `extend` replaces it.
    pub fn empty() -> Self {
        LngLatBounds {
            min: LngLat::new(f64::INFINITY, f64::INFINITY),
            max: LngLat::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a LngLat>) -> Option<Self> {
        let mut b = Self::empty();
        for p in points {
            b.extend(*p);
        }
        (!b.is_empty()).then_some(b)
    }

    pub fn is_empty(&self) -> bool {
        self.min.lng > self.max.lng || self.min.lat > self.max.lat
    }

    pub fn extend(&mut self, p: LngLat) {
        if !p.is_finite() {
            return;
        }
        self.min.lng = self.min.lng.min(p.lng);
        self.min.lat = self.min.lat.min(p.lat);
        self.max.lng = self.max.lng.max(p.lng);
        self.max.lat = self.max.lat.max(p.lat);
    }

    pub fn union(&self, other: &Self) -> Self {
        let mut out = *self;
        if !other.is_empty() {
            out.extend(other.min);
            out.extend(other.max);
        }
        out
    }

    pub fn contains(&self, p: LngLat) -> bool {
        p.lng >= self.min.lng
            && p.lng <= self.max.lng
            && p.lat >= self.min.lat
            && p.lat <= self.max.lat
    }

    pub fn center(&self) -> LngLat {
        LngLat::new(
            (self.min.lng + self.max.lng) * 0.5,
            (self.min.lat + self.max.lat) * 0.5,
        )
    }

    /// `[[west, south], [east, north]]`, the form map libraries take.
    pub fn to_array(&self) -> [[f64; 2]; 2] {
        [self.min.to_array(), self.max.to_array()]
    }
}

impl From<[[f64; 2]; 2]> for LngLatBounds {
    fn from(v: [[f64; 2]; 2]) -> Self {
        Self::new(LngLat::from(v[0]), LngLat::from(v[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::LngLatBounds;
    use crate::geo::LngLat;

    #[test]
    fn extends_and_contains() {
        let pts = [LngLat::new(-124.4, 32.5), LngLat::new(-114.1, 42.0)];
        let b = LngLatBounds::from_points(pts.iter()).expect("bounds");
        assert!(b.contains(LngLat::new(-120.0, 37.0)));
        assert!(!b.contains(LngLat::new(-100.0, 37.0)));
        assert_eq!(b.to_array(), [[-124.4, 32.5], [-114.1, 42.0]]);
    }

    #[test]
    fn empty_input_has_no_bounds() {
        assert!(LngLatBounds::from_points([].iter()).is_none());
        assert!(LngLatBounds::empty().is_empty());
    }

    #[test]
    fn union_ignores_empty() {
        let a = LngLatBounds::from([[0.0, 0.0], [1.0, 1.0]]);
        assert_eq!(a.union(&LngLatBounds::empty()), a);
        let c = a.union(&LngLatBounds::from([[2.0, -1.0], [3.0, 0.5]]));
        assert_eq!(c.to_array(), [[0.0, -1.0], [3.0, 1.0]]);
        assert_eq!(c.center(), LngLat::new(1.5, 0.0));
    }
}
