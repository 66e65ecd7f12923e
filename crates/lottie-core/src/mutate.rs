//! Writes addressed by the paths the scanners report.
//!
//! Every mutator is copy-on-write: it returns an updated copy and leaves the
//! input document untouched. A path that resolves to nothing, or to a value
//! whose current color encoding cannot be determined, is a silent no-op.

use crate::color::{encode, ensure_finite_rgba, keyframes, read_color, Encoding};
use crate::error::{LottieError, LottieResult};
use crate::path::{resolve, resolve_mut};
use lottie_data::model::Rgba;
use serde_json::Value;

/// Overwrite the color at `path` with `rgba` (0-255 channels, 0-1 alpha).
///
/// `path` may address an effect (`v.k`), a fill/stroke shape (`c.k`) or the
/// color array itself. The new value is written in the encoding the stored
/// value already uses.
pub fn replace_color(rgba: Rgba, path: &str, document: &Value) -> LottieResult<Value> {
    ensure_structured(document)?;
    ensure_finite_rgba(rgba)?;

    let mut updated = document.clone();
    match resolve_mut(path, &mut updated).and_then(color_slot) {
        Some(slot) => {
            if !overwrite(slot, rgba)? {
                tracing::debug!(path, "stored color has no readable encoding, left unchanged");
            }
        }
        None => tracing::debug!(path, "no color at path, left unchanged"),
    }
    Ok(updated)
}

/// Overwrite the start value (`s`) of the keyframe at `path`.
pub fn replace_keyframe_color(rgba: Rgba, path: &str, document: &Value) -> LottieResult<Value> {
    ensure_structured(document)?;
    ensure_finite_rgba(rgba)?;

    let mut updated = document.clone();
    match resolve_mut(path, &mut updated).and_then(|kf| kf.get_mut("s")) {
        Some(slot) => {
            if !overwrite(slot, rgba)? {
                tracing::debug!(path, "keyframe value has no readable encoding, left unchanged");
            }
        }
        None => tracing::debug!(path, "no keyframe at path, left unchanged"),
    }
    Ok(updated)
}

/// Per-keyframe colors of the animated color at `path`, normalized to the
/// 0-255 scale with alpha unscaled. `None` unless the color is keyframed.
pub fn get_keyframe_colors(path: &str, document: &Value) -> Option<Vec<Rgba>> {
    let target = resolve(path, document).value()?;
    let frames = keyframes(color_value(target)?)?;
    Some(
        frames
            .iter()
            .filter_map(|frame| frame.get("s"))
            .filter_map(read_color)
            .collect(),
    )
}

/// Replace the string at `path`, such as a text layer's `t.d.k.0.s.t`.
pub fn replace_text(text: &str, path: &str, document: &Value) -> LottieResult<Value> {
    ensure_structured(document)?;

    let mut updated = document.clone();
    match resolve_mut(path, &mut updated) {
        Some(Value::String(current)) => *current = text.to_owned(),
        _ => tracing::debug!(path, "no text at path, left unchanged"),
    }
    Ok(updated)
}

fn ensure_structured(document: &Value) -> LottieResult<()> {
    if document.is_object() || document.is_array() {
        Ok(())
    } else {
        Err(LottieError::type_mismatch(
            "expected an animation document (JSON object or array)",
        ))
    }
}

// Effect value first, then shape color, then the target itself.
fn color_slot(target: &mut Value) -> Option<&mut Value> {
    if target.pointer("/v/k").is_some() {
        target.pointer_mut("/v/k")
    } else if target.pointer("/c/k").is_some() {
        target.pointer_mut("/c/k")
    } else if target.is_array() {
        Some(target)
    } else {
        None
    }
}

fn color_value(target: &Value) -> Option<&Value> {
    target
        .pointer("/v/k")
        .or_else(|| target.pointer("/c/k"))
        .or_else(|| target.is_array().then_some(target))
}

/// Write `rgba` into `slot` in the slot's current encoding. `false` when the
/// slot does not hold a color triple.
fn overwrite(slot: &mut Value, rgba: Rgba) -> LottieResult<bool> {
    let Some(encoding) = Encoding::of_value(slot) else {
        return Ok(false);
    };
    *slot = encode(rgba, encoding)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> Value {
        json!({
            "layers": [{
                "nm": "L",
                "shapes": [
                    { "ty": "fl", "nm": "Unit", "c": { "k": [1, 0, 0.5, 1] } },
                    { "ty": "st", "nm": "Byte", "c": { "k": [10, 20, 30, 1] } },
                    { "ty": "fl", "nm": "Animated", "c": { "a": 1, "k": [
                        { "t": 0, "s": [1, 0, 0, 1] },
                        { "t": 30, "s": [0, 0, 255, 0.5] },
                        { "t": 60 }
                    ] } }
                ]
            }]
        })
    }

    #[test]
    fn keeps_unit_encoding() {
        let doc = document();
        let rgba = Rgba::new(0.0, 128.0, 255.0, 1.0);
        let out = replace_color(rgba, "layers.0.shapes.0", &doc).unwrap();
        assert_eq!(out["layers"][0]["shapes"][0]["c"]["k"], json!([0, 0.502, 1, 1]));
        // input untouched
        assert_eq!(doc["layers"][0]["shapes"][0]["c"]["k"], json!([1, 0, 0.5, 1]));
    }

    #[test]
    fn keeps_byte_encoding() {
        let doc = document();
        let rgba = Rgba::new(0.0, 128.0, 255.0, 0.5);
        let out = replace_color(rgba, "layers.0.shapes.1", &doc).unwrap();
        assert_eq!(out["layers"][0]["shapes"][1]["c"]["k"], json!([0, 128, 255, 0.5]));
    }

    #[test]
    fn accepts_direct_color_path() {
        let doc = document();
        let white = Rgba::new(255.0, 255.0, 255.0, 1.0);
        let out = replace_color(white, "layers.0.shapes.0.c.k", &doc).unwrap();
        assert_eq!(out["layers"][0]["shapes"][0]["c"]["k"], json!([1, 1, 1, 1]));
    }

    #[test]
    fn keyframed_target_is_left_alone() {
        let doc = document();
        let out = replace_color(Rgba::new(1.0, 2.0, 3.0, 1.0), "layers.0.shapes.2", &doc).unwrap();
        assert_eq!(out, doc);
    }

    #[test]
    fn rejects_scalar_documents_and_bad_channels() {
        assert!(matches!(
            replace_color(Rgba::default(), "layers", &json!(42)),
            Err(LottieError::TypeMismatch(_))
        ));
        assert!(matches!(
            replace_color(Rgba::new(f64::NAN, 0.0, 0.0, 1.0), "layers", &document()),
            Err(LottieError::InvalidArgument(_))
        ));
    }

    #[test]
    fn keyframe_colors_are_normalized() {
        let doc = document();
        assert_eq!(
            get_keyframe_colors("layers.0.shapes.2", &doc),
            Some(vec![
                Rgba::new(255.0, 0.0, 0.0, 1.0),
                Rgba::new(0.0, 0.0, 255.0, 0.5),
            ])
        );
        assert_eq!(get_keyframe_colors("layers.0.shapes.0", &doc), None);
        assert_eq!(get_keyframe_colors("layers.4", &doc), None);
    }

    #[test]
    fn replaces_one_keyframe() {
        let doc = document();
        let out = replace_keyframe_color(
            Rgba::new(0.0, 255.0, 0.0, 1.0),
            "layers.0.shapes.2.c.k.0",
            &doc,
        )
        .unwrap();
        let frames = &out["layers"][0]["shapes"][2]["c"]["k"];
        assert_eq!(frames[0]["s"], json!([0, 1, 0, 1]));
        assert_eq!(frames[1], doc["layers"][0]["shapes"][2]["c"]["k"][1]);

        let untouched =
            replace_keyframe_color(Rgba::default(), "layers.0.shapes.2.c.k.2", &doc).unwrap();
        assert_eq!(untouched, doc);
    }

    #[test]
    fn keyframe_keeps_byte_encoding() {
        let doc = document();
        let out = replace_keyframe_color(
            Rgba::new(12.0, 34.0, 56.0, 0.25),
            "layers.0.shapes.2.c.k.1",
            &doc,
        )
        .unwrap();
        let frames = &out["layers"][0]["shapes"][2]["c"]["k"];
        assert_eq!(frames[1]["s"], json!([12, 34, 56, 0.25]));
        assert_eq!(frames[0], doc["layers"][0]["shapes"][2]["c"]["k"][0]);
    }

    #[test]
    fn replaces_text_only_over_strings() {
        let doc = json!({
            "layers": [{ "t": { "d": { "k": [{ "s": { "t": "Hello", "s": 12 } }] } } }]
        });
        let out = replace_text("Bye", "layers.0.t.d.k.0.s.t", &doc).unwrap();
        assert_eq!(out["layers"][0]["t"]["d"]["k"][0]["s"]["t"], json!("Bye"));

        let same = replace_text("Bye", "layers.0.t.d.k.0.s.s", &doc).unwrap();
        assert_eq!(same, doc);
    }
}
