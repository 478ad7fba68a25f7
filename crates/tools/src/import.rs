//! Converts Census cartographic-boundary GeoJSON into the boundary files the
//! map loads: array-wrapped `ste_*`/`coty_*` properties, coordinates rounded
//! to a fixed number of decimals, degenerate rings dropped.

use regions::states::{STATES_PLUS_DC, state_abbreviation_for_fips, state_name};
use serde_json::{Map, Value, json};
use tracing::debug;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoundaryKind {
    States,
    Counties,
}

impl BoundaryKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "states" => Some(Self::States),
            "counties" => Some(Self::Counties),
            _ => None,
        }
    }
}

pub const DEFAULT_DECIMALS: u32 = 3;

/// Rewrites a Census FeatureCollection. Features outside the 50 states and DC
/// are skipped, as are features left without a ring after rounding.
pub fn import_census(raw: &Value, kind: BoundaryKind, decimals: u32) -> Result<Value, String> {
    let features = raw
        .get("features")
        .and_then(Value::as_array)
        .ok_or("not a FeatureCollection")?;

    let mut out = Vec::with_capacity(features.len());
    for (i, feature) in features.iter().enumerate() {
        let props = feature
            .get("properties")
            .and_then(Value::as_object)
            .ok_or_else(|| format!("feature {i}: missing properties"))?;
        let Some(properties) = map_properties(props, kind) else {
            debug!(feature = i, "skipping feature outside states and DC");
            continue;
        };
        let geometry = feature
            .get("geometry")
            .ok_or_else(|| format!("feature {i}: missing geometry"))?;
        let Some(geometry) = simplify_geometry(geometry, decimals)
            .map_err(|e| format!("feature {i}: {e}"))?
        else {
            debug!(feature = i, "skipping feature with no usable ring");
            continue;
        };
        out.push(json!({
            "type": "Feature",
            "properties": properties,
            "geometry": geometry,
        }));
    }

    out.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
    Ok(json!({ "type": "FeatureCollection", "features": out }))
}

fn text<'a>(props: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    props.get(key).and_then(Value::as_str)
}

fn map_properties(props: &Map<String, Value>, kind: BoundaryKind) -> Option<Value> {
    let fips = text(props, "STATEFP")?;
    let abbr = state_abbreviation_for_fips(fips)?;
    if !STATES_PLUS_DC.contains(&abbr) {
        return None;
    }
    let state = state_name(abbr)?;
    match kind {
        BoundaryKind::States => Some(json!({
            "ste_code": [fips],
            "ste_name": [state],
            "ste_type": "state",
            "ste_area_code": "USA",
        })),
        BoundaryKind::Counties => {
            let name = text(props, "NAME")?;
            let geoid = text(props, "GEOID")?;
            Some(json!({
                "coty_code": [geoid],
                "coty_name": [name],
                "ste_name": [state],
                "coty_type": "county",
            }))
        }
    }
}

fn sort_key(feature: &Value) -> (String, String) {
    let first = |key: &str| {
        feature["properties"][key][0]
            .as_str()
            .unwrap_or_default()
            .to_string()
    };
    (first("ste_name"), first("coty_name"))
}

fn simplify_geometry(geometry: &Value, decimals: u32) -> Result<Option<Value>, String> {
    let kind = geometry.get("type").and_then(Value::as_str).unwrap_or("");
    let coords = geometry.get("coordinates").ok_or("missing coordinates")?;
    let polygons: Vec<Vec<Vec<[f64; 2]>>> = match kind {
        "Polygon" => vec![parse_polygon(coords)?],
        "MultiPolygon" => coords
            .as_array()
            .ok_or("MultiPolygon coordinates are not an array")?
            .iter()
            .map(parse_polygon)
            .collect::<Result<_, _>>()?,
        other => return Err(format!("unsupported geometry {other:?}")),
    };

    let polygons: Vec<Vec<Vec<[f64; 2]>>> = polygons
        .into_iter()
        .filter_map(|rings| simplify_polygon(rings, decimals))
        .collect();

    if polygons.len() > 1 {
        return Ok(Some(json!({ "type": "MultiPolygon", "coordinates": polygons })));
    }
    Ok(polygons
        .into_iter()
        .next()
        .map(|rings| json!({ "type": "Polygon", "coordinates": rings })))
}

fn parse_polygon(value: &Value) -> Result<Vec<Vec<[f64; 2]>>, String> {
    value
        .as_array()
        .ok_or("polygon is not an array of rings")?
        .iter()
        .map(parse_ring)
        .collect()
}

fn parse_ring(value: &Value) -> Result<Vec<[f64; 2]>, String> {
    let positions = value.as_array().ok_or("ring is not an array")?;
    let mut ring = Vec::with_capacity(positions.len());
    for p in positions {
        match (p.get(0).and_then(Value::as_f64), p.get(1).and_then(Value::as_f64)) {
            (Some(lng), Some(lat)) => ring.push([lng, lat]),
            _ => return Err(format!("bad position {p}")),
        }
    }
    Ok(ring)
}

/// Keeps the polygon only if its outer ring survives; holes that collapse are dropped.
fn simplify_polygon(rings: Vec<Vec<[f64; 2]>>, decimals: u32) -> Option<Vec<Vec<[f64; 2]>>> {
    let mut rings = rings.into_iter().map(|r| simplify_ring(&r, decimals));
    let outer = rings.next()??;
    let mut kept = vec![outer];
    kept.extend(rings.flatten());
    Some(kept)
}

/// Rounds every position and drops consecutive repeats. A closed ring needs
/// at least four positions.
pub fn simplify_ring(ring: &[[f64; 2]], decimals: u32) -> Option<Vec<[f64; 2]>> {
    let scale = 10f64.powi(decimals as i32);
    let round = |v: f64| (v * scale).round() / scale;

    let mut out: Vec<[f64; 2]> = Vec::with_capacity(ring.len());
    for p in ring {
        let q = [round(p[0]), round(p[1])];
        if out.last() != Some(&q) {
            out.push(q);
        }
    }
    if let (Some(first), Some(last)) = (out.first().copied(), out.last().copied()) {
        if first != last {
            out.push(first);
        }
    }
    (out.len() >= 4).then_some(out)
}
