use regions::{COUNTY_NAME_KEY, STATE_NAME_KEY};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};

/// Legacy MapLibre filter expressions over feature properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Eq { key: &'static str, value: String },
    In { key: &'static str, values: Vec<String> },
    All(Vec<Filter>),
}

impl Filter {
    /// `["all", ["in", "ste_name", ...names]]`; an empty list matches nothing.
    pub fn states_named<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Filter::All(vec![Filter::In {
            key: STATE_NAME_KEY,
            values: names.into_iter().map(str::to_string).collect(),
        }])
    }

    pub fn state(name: &str) -> Self {
        Filter::Eq {
            key: STATE_NAME_KEY,
            value: name.to_string(),
        }
    }

    pub fn county(county: &str, state: &str) -> Self {
        Filter::All(vec![
            Filter::Eq {
                key: COUNTY_NAME_KEY,
                value: county.to_string(),
            },
            Filter::Eq {
                key: STATE_NAME_KEY,
                value: state.to_string(),
            },
        ])
    }

    pub fn to_value(&self) -> Value {
        match self {
            Filter::Eq { key, value } => json!(["==", key, value]),
            Filter::In { key, values } => {
                let mut out = vec![json!("in"), json!(key)];
                out.extend(values.iter().map(|v| json!(v)));
                Value::Array(out)
            }
            Filter::All(parts) => {
                let mut out = vec![json!("all")];
                out.extend(parts.iter().map(Filter::to_value));
                Value::Array(out)
            }
        }
    }

    /// Evaluates the filter against plain string properties.
    pub fn matches(&self, properties: &Map<String, Value>) -> bool {
        let prop = |key: &str| properties.get(key).and_then(Value::as_str);
        match self {
            Filter::Eq { key, value } => prop(key) == Some(value.as_str()),
            Filter::In { key, values } => {
                prop(key).is_some_and(|p| values.iter().any(|v| v == p))
            }
            Filter::All(parts) => parts.iter().all(|f| f.matches(properties)),
        }
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}
