use serde_json::{Value, json};

pub const BASE_FILL: &str = "#FCF6E1";
pub const OUTLINE: &str = "#1E1E1E";
pub const YELLOW: &str = "#F9D65B";
pub const TEAL: &str = "#71C4CB";
pub const PURPLE: &str = "#6E33CF";
pub const GREY: &str = "#8F8F8F";
pub const HIGHLIGHT: &str = "#3D0DB4";
pub const LABEL_TEXT: &str = "#000000";

/// Fill opacity, optionally raised while the feature carries `hover: true`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Opacity {
    Fixed(f64),
    Hover { hovered: f64, idle: f64 },
}

impl Opacity {
    pub fn to_value(self) -> Value {
        match self {
            Opacity::Fixed(v) => json!(v),
            Opacity::Hover { hovered, idle } => json!([
                "case",
                ["boolean", ["feature-state", "hover"], false],
                hovered,
                idle
            ]),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FillStyle {
    pub color: &'static str,
    pub outline: &'static str,
    pub opacity: Opacity,
}

impl FillStyle {
    pub const fn hover(color: &'static str, hovered: f64, idle: f64) -> Self {
        Self {
            color,
            outline: OUTLINE,
            opacity: Opacity::Hover { hovered, idle },
        }
    }

    pub const fn solid(color: &'static str) -> Self {
        Self {
            color,
            outline: OUTLINE,
            opacity: Opacity::Fixed(1.0),
        }
    }

    pub fn paint(&self) -> Value {
        json!({
            "fill-color": self.color,
            "fill-outline-color": self.outline,
            "fill-opacity": self.opacity.to_value(),
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineStyle {
    pub color: &'static str,
    pub width: f64,
}

impl LineStyle {
    pub fn paint(&self) -> Value {
        json!({
            "line-color": self.color,
            "line-width": self.width,
            "line-opacity": 1.0,
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub color: &'static str,
}

impl TextStyle {
    pub fn paint(&self) -> Value {
        json!({ "text-color": self.color })
    }

    pub fn layout(&self) -> serde_json::Map<String, Value> {
        let mut layout = serde_json::Map::new();
        layout.insert("text-field".to_string(), json!(["get", "name"]));
        layout.insert("text-size".to_string(), json!(self.size));
        layout.insert("text-anchor".to_string(), json!("center"));
        layout
    }
}
