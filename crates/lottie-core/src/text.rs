//! Text layer inventory.

use lottie_data::model::{Font, TextDocument, TextInfo};
use serde_json::Value;

/// Layer `ty` of a text layer.
pub const TEXT_LAYER: f64 = 5.0;

/// Whether the document ships glyph or font data, which is how Bodymovin
/// exports compositions containing text layers.
pub fn has_text_layers(document: &Value) -> bool {
    document.get("chars").is_some_and(is_truthy) || document.get("fonts").is_some_and(is_truthy)
}

/// List the top-level text layers with their displayed string and font.
///
/// `path` addresses the string for a later write and is derived from the
/// layer's declared `ind` (`layers.<ind - 1>.t.d.k.0.s.t`), falling back to
/// the layer's position when `ind` is absent or not a positive integer. Font
/// family comes from the first `fonts.list` entry whose `fName` matches;
/// malformed entries are skipped one by one.
pub fn scan_texts(document: &Value) -> Vec<TextInfo> {
    let fonts: Vec<Font> = document
        .pointer("/fonts/list")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
                .collect()
        })
        .unwrap_or_default();

    let Some(layers) = document.get("layers").and_then(Value::as_array) else {
        return Vec::new();
    };

    layers
        .iter()
        .enumerate()
        .filter(|(_, layer)| layer.get("ty").and_then(Value::as_f64) == Some(TEXT_LAYER))
        .filter_map(|(position, layer)| {
            let name = layer.get("nm").and_then(Value::as_str).map(str::to_owned);
            let Some(doc) = first_text_document(layer) else {
                tracing::debug!(layer = ?name, "text layer without text document");
                return None;
            };

            let index = match layer.get("ind").and_then(Value::as_f64) {
                Some(ind) if ind >= 1.0 && ind.fract() == 0.0 => ind as usize - 1,
                _ => position,
            };
            let font_family = doc.f.as_deref().and_then(|f| {
                fonts
                    .iter()
                    .find(|font| font.name == f)
                    .and_then(|font| font.family.clone())
            });

            Some(TextInfo {
                name,
                text: doc.t,
                font_name: doc.f,
                font_family,
                path: format!("layers.{index}.t.d.k.0.s.t"),
            })
        })
        .collect()
}

fn first_text_document(layer: &Value) -> Option<TextDocument> {
    let s = layer.pointer("/t/d/k/0/s")?;
    serde_json::from_value(s.clone()).ok()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
