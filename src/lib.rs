//! Inspect and recolor Lottie/Bodymovin animation documents.
//!
//! The library works on an already parsed `serde_json::Value`:
//!
//! - [`scan_colors`] lists every fill and stroke color, following
//!   `thisComp.layer(..).effect(..)(..)` expressions to the effect that
//!   drives them.
//! - [`replace_color`] writes a new color at a reported path, keeping the
//!   stored encoding (0-1 or 0-255).
//! - [`scan_texts`] lists text layers with their string and font.
//!
//! All mutators are copy-on-write. [`Document`] wraps the same operations
//! around an owned value.

mod document;

pub use document::Document;
pub use lottie_core::{
    color_inventory, from_unit, get_keyframe_colors, has_text_layers, replace_color,
    replace_keyframe_color, replace_text, resolve, resolve_expression, rgba_from_value,
    scan_colors, scan_colors_with, scan_texts, to_unit, Encoding, LottieError, LottieResult,
    Resolved, ScanOptions,
};
pub use lottie_data::model::{ColorInfo, LayerColors, ResolvedEffect, Rgba, ShapeKind, TextInfo};
