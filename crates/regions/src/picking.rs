use foundation::LngLat;
use foundation::math::{point_in_multipolygon, stable_total_cmp_f64};

use crate::catalog::{Region, RegionCatalog, RegionKind};

/// Region under a pointer position.
///
/// Ordering contract:
/// - If several regions contain the point, the smallest area wins (a city
///   district drawn over its surrounding state).
/// - Equal areas fall back to the lower feature id.
pub fn pick_region(catalog: &RegionCatalog, kind: RegionKind, at: LngLat) -> Option<&Region> {
    if !at.is_finite() {
        return None;
    }

    let mut best: Option<&Region> = None;
    for region in catalog.regions(kind) {
        let Some(bounds) = region.bounds else {
            continue;
        };
        if !bounds.contains(at) {
            continue;
        }
        if !point_in_multipolygon(at, &region.polygons) {
            continue;
        }

        best = match best {
            None => Some(region),
            Some(b) => {
                let ord = stable_total_cmp_f64(region.area, b.area)
                    .then_with(|| region.id.cmp(&b.id));
                if ord.is_lt() { Some(region) } else { Some(b) }
            }
        };
    }
    best
}
