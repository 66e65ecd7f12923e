use serde::{de, ser::SerializeTuple, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An RGBA color.
///
/// In reported inventories `r`, `g` and `b` are always on the 0-255 scale and
/// `a` is the stored opacity (0-1), never color-scaled.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[f64; 4]> for Rgba {
    fn from([r, g, b, a]: [f64; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Rgba> for [f64; 4] {
    fn from(c: Rgba) -> Self {
        c.to_array()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

// Serialized as a bare `[r, g, b, a]` array, integers where the value is integral.
impl Serialize for Rgba {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tup = serializer.serialize_tuple(4)?;
        for c in self.to_array() {
            if c.fract() == 0.0 && c.abs() < i64::MAX as f64 {
                tup.serialize_element(&(c as i64))?;
            } else {
                tup.serialize_element(&c)?;
            }
        }
        tup.end()
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let channels = Vec::<f64>::deserialize(deserializer)?;
        match channels.as_slice() {
            [r, g, b] => Ok(Rgba::new(*r, *g, *b, 1.0)),
            [r, g, b, a] => Ok(Rgba::new(*r, *g, *b, *a)),
            _ => Err(de::Error::invalid_length(
                channels.len(),
                &"an array of 3 or 4 color channels",
            )),
        }
    }
}

/// Drawable shape types that carry a color (`c`) property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    #[serde(rename = "fl")]
    Fill,
    #[serde(rename = "st")]
    Stroke,
}

impl ShapeKind {
    /// Map a shape `ty` code to a colored shape kind. Other shapes yield `None`.
    pub fn from_code(ty: &str) -> Option<Self> {
        match ty {
            "fl" => Some(ShapeKind::Fill),
            "st" => Some(ShapeKind::Stroke),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            ShapeKind::Fill => "fl",
            ShapeKind::Stroke => "st",
        }
    }
}

/// One discovered color. `path` is the address to hand back for mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub path: String,
    pub rgba: Rgba,
    /// The color is keyframed; `rgba` holds the first keyframe's value.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub animated: bool,
}

/// Colors found on a single shape-bearing layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerColors {
    #[serde(default)]
    pub name: Option<String>,
    pub shapes: Vec<ColorInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextInfo {
    #[serde(default)]
    pub name: Option<String>,
    pub text: String,
    #[serde(default, rename = "fontName", skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,
    #[serde(default, rename = "fontFamily", skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    pub path: String,
}

/// Leaf effect selected by a `layer(..).effect(..)(..)` expression.
///
/// Serializes as the effect's own fields plus `parentNm` and `path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedEffect {
    #[serde(flatten)]
    pub effect: serde_json::Map<String, serde_json::Value>,
    #[serde(default, rename = "parentNm")]
    pub parent_name: Option<String>,
    pub path: String,
}

impl ResolvedEffect {
    pub fn name(&self) -> Option<&str> {
        self.effect.get("nm").and_then(|v| v.as_str())
    }

    /// The effect's stored value (`v.k`).
    pub fn value(&self) -> Option<&serde_json::Value> {
        self.effect.get("v").and_then(|v| v.get("k"))
    }
}

// Typed views over document fragments

/// Text document keyframe value (`t.d.k[n].s`).
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TextDocument {
    #[serde(default)]
    pub t: String,
    #[serde(default)]
    pub f: Option<String>,
}

/// One `fonts.list` entry.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Font {
    #[serde(rename = "fName")]
    pub name: String,
    #[serde(default, rename = "fFamily")]
    pub family: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rgba_serializes_as_array() {
        let c = Rgba::new(0.0, 128.0, 255.0, 0.5);
        assert_eq!(serde_json::to_value(c).unwrap(), json!([0, 128, 255, 0.5]));
    }

    #[test]
    fn rgba_deserialize_defaults_alpha() {
        let c: Rgba = serde_json::from_value(json!([10, 20, 30])).unwrap();
        assert_eq!(c, Rgba::new(10.0, 20.0, 30.0, 1.0));
        assert!(serde_json::from_value::<Rgba>(json!([1, 2])).is_err());
        assert!(serde_json::from_value::<Rgba>(json!([1, 2, 3, 1, 0])).is_err());
    }

    #[test]
    fn shape_kind_codes_round_trip() {
        for kind in [ShapeKind::Fill, ShapeKind::Stroke] {
            assert_eq!(ShapeKind::from_code(kind.code()), Some(kind));
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.code()));
        }
        assert_eq!(ShapeKind::from_code("gf"), None);
    }

    #[test]
    fn color_info_field_names() {
        let info = ColorInfo {
            name: Some("Fill 1".into()),
            kind: ShapeKind::Stroke,
            path: "layers.0.shapes.1".into(),
            rgba: Rgba::new(255.0, 0.0, 0.0, 1.0),
            animated: false,
        };
        assert_eq!(
            serde_json::to_value(&info).unwrap(),
            json!({
                "name": "Fill 1",
                "type": "st",
                "path": "layers.0.shapes.1",
                "rgba": [255, 0, 0, 1]
            })
        );
    }

    #[test]
    fn resolved_effect_flattens() {
        let effect: ResolvedEffect = serde_json::from_value(json!({
            "nm": "Color",
            "v": { "k": [0.2, 0.4, 0.6, 1] },
            "parentNm": "Fill 3",
            "path": "layers.1.ef.0.ef.0.v.k"
        }))
        .unwrap();
        assert_eq!(effect.name(), Some("Color"));
        assert_eq!(effect.parent_name.as_deref(), Some("Fill 3"));
        assert_eq!(effect.value(), Some(&json!([0.2, 0.4, 0.6, 1])));
    }

    #[test]
    fn text_info_omits_missing_fonts() {
        let info = TextInfo {
            name: Some("Title".into()),
            text: "Hello".into(),
            font_name: None,
            font_family: None,
            path: "layers.0.t.d.k.0.s.t".into(),
        };
        let v = serde_json::to_value(&info).unwrap();
        assert!(v.get("fontName").is_none());
        assert!(v.get("fontFamily").is_none());
    }
}
