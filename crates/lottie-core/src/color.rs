//! Conversion between 0-255 channels and 0-1 unit channels.
//!
//! Documents mix both encodings, so the encoding of a stored color is inferred
//! from the stored triple every time it is read or written.

use crate::error::{LottieError, LottieResult};
use lottie_data::model::Rgba;
use serde_json::Value;

/// Convert a 0-255 channel to the unit interval, rounded to 3 decimals.
pub fn to_unit(n: f64) -> LottieResult<f64> {
    ensure_finite(n)?;
    Ok(((n / 255.0) * 1000.0).round() / 1000.0)
}

/// Convert a unit channel to the 0-255 scale, rounded to an integer.
pub fn from_unit(n: f64) -> LottieResult<f64> {
    ensure_finite(n)?;
    Ok((n * 255.0).round())
}

/// Read one channel out of a JSON value.
pub fn channel(value: &Value) -> LottieResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| LottieError::invalid_argument(format!("expected a number, got {value}")))
}

fn ensure_finite(n: f64) -> LottieResult<()> {
    if n.is_finite() {
        Ok(())
    } else {
        Err(LottieError::invalid_argument(format!(
            "expected a finite channel value, got {n}"
        )))
    }
}

/// How the r, g, b channels of a stored color are encoded. Alpha is never scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Every channel is in `[0, 1]`.
    Unit,
    /// At least one channel is above 1: the 0-255 scale.
    Byte,
}

impl Encoding {
    pub fn detect(rgb: [f64; 3]) -> Self {
        if rgb.iter().all(|c| *c <= 1.0) {
            Encoding::Unit
        } else {
            Encoding::Byte
        }
    }

    /// Infer the encoding of a stored color array. `None` if `value` does not
    /// start with three numbers.
    pub fn of_value(value: &Value) -> Option<Self> {
        stored_rgb(value).map(Self::detect)
    }
}

fn stored_rgb(value: &Value) -> Option<[f64; 3]> {
    let items = value.as_array()?;
    match items.as_slice() {
        [r, g, b, ..] => Some([r.as_f64()?, g.as_f64()?, b.as_f64()?]),
        _ => None,
    }
}

/// Read a stored color array and normalize it to the reporting form
/// (0-255 channels, unscaled alpha). Missing alpha reads as 1.
pub fn read_color(value: &Value) -> Option<Rgba> {
    let rgb = stored_rgb(value)?;
    let a = value.get(3).and_then(Value::as_f64).unwrap_or(1.0);
    let [r, g, b] = match Encoding::detect(rgb) {
        Encoding::Unit => {
            let [r, g, b] = rgb;
            [from_unit(r).ok()?, from_unit(g).ok()?, from_unit(b).ok()?]
        }
        Encoding::Byte => rgb,
    };
    Some(Rgba::new(r, g, b, a))
}

/// Keyframes of an animated property value: a non-empty array whose entries
/// are not numbers. `None` for literal values.
pub fn keyframes(value: &Value) -> Option<&[Value]> {
    let items = value.as_array()?;
    if items.is_empty() || items.iter().any(Value::is_number) {
        return None;
    }
    Some(items)
}

/// Reject a color with a NaN or infinite channel.
pub fn ensure_finite_rgba(rgba: Rgba) -> LottieResult<()> {
    if rgba.to_array().iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(LottieError::invalid_argument(format!(
            "color channels must be finite numbers, got {rgba}"
        )))
    }
}

/// Encode a 0-255 color as a stored JSON array in `encoding`.
pub fn encode(rgba: Rgba, encoding: Encoding) -> LottieResult<Value> {
    ensure_finite_rgba(rgba)?;
    let rgb = match encoding {
        Encoding::Unit => [to_unit(rgba.r)?, to_unit(rgba.g)?, to_unit(rgba.b)?],
        Encoding::Byte => rgba.rgb(),
    };
    Ok(Value::Array(
        rgb.into_iter().chain([rgba.a]).map(number).collect(),
    ))
}

/// Parse a caller-supplied `[r, g, b]` or `[r, g, b, a]` array.
pub fn rgba_from_value(value: &Value) -> LottieResult<Rgba> {
    let items = value.as_array().ok_or_else(|| {
        LottieError::invalid_argument(format!("expected an RGBA array, got {value}"))
    })?;
    let channels = items.iter().map(channel).collect::<LottieResult<Vec<_>>>()?;
    match channels.as_slice() {
        [r, g, b] => Ok(Rgba::new(*r, *g, *b, 1.0)),
        [r, g, b, a] => Ok(Rgba::new(*r, *g, *b, *a)),
        _ => Err(LottieError::invalid_argument(format!(
            "expected 3 or 4 channels, got {}",
            channels.len()
        ))),
    }
}

/// JSON number for `n`, stored as an integer when it is integral.
pub(crate) fn number(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}
