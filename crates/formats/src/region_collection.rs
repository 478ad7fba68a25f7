use foundation::{FeatureId, LngLat, Polygon, Ring};
use serde_json::{Map, Value};

use crate::properties::normalize_wrapped;

#[derive(Debug, Clone, PartialEq)]
pub struct RegionFeature {
    /// Position in the collection; the id the map library generates for it.
    pub id: FeatureId,
    pub properties: Map<String, Value>,
    /// Empty when the source feature has a null geometry.
    pub polygons: Vec<Polygon>,
    /// Whether the source geometry was a MultiPolygon.
    pub multi: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionCollection {
    pub features: Vec<RegionFeature>,
}

#[derive(Debug)]
pub enum GeoJsonError {
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for GeoJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoJsonError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            GeoJsonError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for GeoJsonError {}

impl RegionCollection {
    pub fn from_geojson_str(payload: &str) -> Result<Self, GeoJsonError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| GeoJsonError::InvalidFeature {
                index: 0,
                reason: format!("JSON parse error: {e}"),
            })?;
        Self::from_geojson_value(value)
    }

    pub fn from_geojson_value(value: Value) -> Result<Self, GeoJsonError> {
        let obj = value
            .as_object()
            .ok_or(GeoJsonError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(GeoJsonError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(GeoJsonError::NotAFeatureCollection);
        }

        let features_val = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(GeoJsonError::NotAFeatureCollection)?;

        let mut features = Vec::with_capacity(features_val.len());
        for (index, feat_val) in features_val.iter().enumerate() {
            let feat_obj = feat_val.as_object().ok_or(GeoJsonError::InvalidFeature {
                index,
                reason: "feature must be an object".to_string(),
            })?;

            let feat_type = feat_obj.get("type").and_then(|v| v.as_str()).ok_or(
                GeoJsonError::InvalidFeature {
                    index,
                    reason: "feature missing type".to_string(),
                },
            )?;
            if feat_type != "Feature" {
                return Err(GeoJsonError::InvalidFeature {
                    index,
                    reason: format!("unexpected feature type: {feat_type}"),
                });
            }

            let properties = feat_obj
                .get("properties")
                .and_then(|v| v.as_object())
                .cloned()
                .unwrap_or_default();

            let (polygons, multi) = match feat_obj.get("geometry") {
                None | Some(Value::Null) => (Vec::new(), false),
                Some(geometry_val) => parse_area_geometry(geometry_val)
                    .map_err(|reason| GeoJsonError::InvalidFeature { index, reason })?,
            };

            features.push(RegionFeature {
                id: FeatureId::new(index as u32),
                properties,
                polygons,
                multi,
            });
        }

        Ok(Self { features })
    }

    /// Unwrap array-wrapped values of `key` on every feature.
    ///
    /// Returns the number of features that changed.
    pub fn normalize_property(&mut self, key: &str) -> usize {
        self.features
            .iter_mut()
            .map(|f| normalize_wrapped(&mut f.properties, key))
            .filter(|changed| *changed)
            .count()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Emits a GeoJSON FeatureCollection. Feature ids are left out so the map
    /// library's generated ids line up with `RegionFeature::id`.
    pub fn to_geojson_value(&self) -> Value {
        let features = self
            .features
            .iter()
            .map(|feat| {
                let mut fobj = Map::new();
                fobj.insert("type".to_string(), Value::String("Feature".to_string()));
                fobj.insert(
                    "properties".to_string(),
                    Value::Object(feat.properties.clone()),
                );
                fobj.insert("geometry".to_string(), area_geometry_to_value(feat));
                Value::Object(fobj)
            })
            .collect();
        feature_collection(features)
    }
}

/// Point FeatureCollection with a single `name` property per point.
pub fn named_points_to_geojson<'a>(points: impl IntoIterator<Item = (&'a str, LngLat)>) -> Value {
    let features = points
        .into_iter()
        .map(|(name, at)| {
            let mut props = Map::new();
            props.insert("name".to_string(), Value::String(name.to_string()));

            let mut geom = Map::new();
            geom.insert("type".to_string(), Value::String("Point".to_string()));
            geom.insert("coordinates".to_string(), point_coords(at));

            let mut fobj = Map::new();
            fobj.insert("type".to_string(), Value::String("Feature".to_string()));
            fobj.insert("geometry".to_string(), Value::Object(geom));
            fobj.insert("properties".to_string(), Value::Object(props));
            Value::Object(fobj)
        })
        .collect();
    feature_collection(features)
}

fn feature_collection(features: Vec<Value>) -> Value {
    let mut root = Map::new();
    root.insert(
        "type".to_string(),
        Value::String("FeatureCollection".to_string()),
    );
    root.insert("features".to_string(), Value::Array(features));
    Value::Object(root)
}

fn area_geometry_to_value(feat: &RegionFeature) -> Value {
    if feat.polygons.is_empty() {
        return Value::Null;
    }
    let mut obj = Map::new();
    if feat.multi || feat.polygons.len() > 1 {
        obj.insert(
            "type".to_string(),
            Value::String("MultiPolygon".to_string()),
        );
        let coords = feat.polygons.iter().map(polygon_coords).collect();
        obj.insert("coordinates".to_string(), Value::Array(coords));
    } else {
        obj.insert("type".to_string(), Value::String("Polygon".to_string()));
        obj.insert("coordinates".to_string(), polygon_coords(&feat.polygons[0]));
    }
    Value::Object(obj)
}

fn polygon_coords(poly: &Polygon) -> Value {
    Value::Array(
        poly.iter()
            .map(|ring| Value::Array(ring.iter().map(|p| point_coords(*p)).collect()))
            .collect(),
    )
}

fn point_coords(p: LngLat) -> Value {
    Value::Array(vec![Value::from(p.lng), Value::from(p.lat)])
}

fn parse_area_geometry(value: &Value) -> Result<(Vec<Polygon>, bool), String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;

    let coords = obj
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    match ty {
        "Polygon" => Ok((vec![parse_polygon(coords)?], false)),
        "MultiPolygon" => Ok((parse_multi_polygon(coords)?, true)),
        other => Err(format!("unsupported region geometry type: {other}")),
    }
}

fn parse_point(coords: &Value) -> Result<LngLat, String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0].as_f64().ok_or("lon must be a number".to_string())?;
    let lat = arr[1].as_f64().ok_or("lat must be a number".to_string())?;
    Ok(LngLat::new(lon, lat))
}

fn parse_ring(coords: &Value) -> Result<Ring, String> {
    let arr = coords
        .as_array()
        .ok_or("ring must be an array".to_string())?;
    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        out.push(parse_point(item)?);
    }
    Ok(out)
}

fn parse_polygon(coords: &Value) -> Result<Polygon, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    let mut out = Vec::with_capacity(rings.len());
    for ring in rings {
        out.push(parse_ring(ring)?);
    }
    Ok(out)
}

fn parse_multi_polygon(coords: &Value) -> Result<Vec<Polygon>, String> {
    let polys = coords
        .as_array()
        .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
    let mut out = Vec::with_capacity(polys.len());
    for poly in polys {
        out.push(parse_polygon(poly)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{GeoJsonError, RegionCollection, named_points_to_geojson};
    use crate::properties::property_str;
    use foundation::{FeatureId, LngLat};
    use serde_json::json;

    #[test]
    fn parses_bundled_states() {
        let payload = include_str!("../../../testdata/geojson/states.json");
        let states = RegionCollection::from_geojson_str(payload).expect("parse states");
        assert!(!states.is_empty());
        for (i, f) in states.features.iter().enumerate() {
            assert_eq!(f.id, FeatureId::new(i as u32));
            assert!(property_str(&f.properties, "ste_name").is_some());
            assert!(!f.polygons.is_empty());
        }
    }

    #[test]
    fn keeps_null_geometry_features_for_id_alignment() {
        let value = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"ste_name": "Nowhere"}, "geometry": null},
                {"type": "Feature", "properties": {"ste_name": "Square"}, "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
                }}
            ]
        });
        let c = RegionCollection::from_geojson_value(value).expect("parse");
        assert_eq!(c.len(), 2);
        assert!(c.features[0].polygons.is_empty());
        assert_eq!(c.features[1].id, FeatureId::new(1));
        assert_eq!(c.features[1].polygons[0][0].len(), 5);
    }

    #[test]
    fn rejects_non_area_geometry() {
        let value = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}}
            ]
        });
        let err = RegionCollection::from_geojson_value(value).unwrap_err();
        assert!(matches!(err, GeoJsonError::InvalidFeature { index: 0, .. }));
        assert!(err.to_string().contains("Point"));
    }

    #[test]
    fn rejects_plain_object() {
        let err = RegionCollection::from_geojson_str("{\"type\": \"Feature\"}").unwrap_err();
        assert!(matches!(err, GeoJsonError::NotAFeatureCollection));
    }

    #[test]
    fn normalizes_and_reemits_without_ids() {
        let value = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "id": 7, "properties": {"ste_name": ["Ohio"]}, "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [[[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]]
                }}
            ]
        });
        let mut c = RegionCollection::from_geojson_value(value).expect("parse");
        assert_eq!(c.normalize_property("ste_name"), 1);
        assert_eq!(c.normalize_property("ste_name"), 0);

        let out = c.to_geojson_value();
        let feat = &out["features"][0];
        assert_eq!(feat["properties"]["ste_name"], json!("Ohio"));
        assert_eq!(feat["geometry"]["type"], json!("MultiPolygon"));
        assert!(feat.get("id").is_none());
    }

    #[test]
    fn counts_only_wrapped_features_as_normalized() {
        let square = json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
        });
        let value = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"ste_name": "Texas"}, "geometry": square},
                {"type": "Feature", "properties": {"ste_name": ["Utah"]}, "geometry": square},
                {"type": "Feature", "properties": {"ste_name": []}, "geometry": square}
            ]
        });
        let mut c = RegionCollection::from_geojson_value(value).expect("parse");
        assert_eq!(c.normalize_property("ste_name"), 2);
        assert_eq!(property_str(&c.features[0].properties, "ste_name"), Some("Texas"));
        assert_eq!(property_str(&c.features[1].properties, "ste_name"), Some("Utah"));
        assert_eq!(c.features[2].properties["ste_name"], json!(null));
    }

    #[test]
    fn emits_named_points() {
        let v = named_points_to_geojson([("Texas", LngLat::new(-99.0, 31.0))]);
        assert_eq!(v["type"], json!("FeatureCollection"));
        assert_eq!(v["features"][0]["properties"]["name"], json!("Texas"));
        assert_eq!(
            v["features"][0]["geometry"]["coordinates"],
            json!([-99.0, 31.0])
        );
    }
}
