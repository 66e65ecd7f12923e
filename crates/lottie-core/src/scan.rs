//! Color inventory of a document's fill and stroke shapes.

use crate::color::{keyframes, read_color};
use crate::expressions::CompObject;
use crate::path::join;
use lottie_data::model::{ColorInfo, LayerColors, Rgba, ShapeKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Knobs for [`scan_colors_with`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Also walk `assets[i].layers`, after the top-level layers.
    pub include_assets: bool,
    /// Follow `c.x` expressions to the effect that drives the color. When off,
    /// or when an expression cannot be resolved, the shape's own `c.k` is used.
    pub resolve_expressions: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            include_assets: true,
            resolve_expressions: true,
        }
    }
}

/// Scan with [`ScanOptions::default`].
pub fn scan_colors(document: &Value) -> Vec<LayerColors> {
    scan_colors_with(document, &ScanOptions::default())
}

/// Collect every fill/stroke color, layer by layer.
///
/// Top-level `layers` are walked first, then each asset's `layers` in order.
/// One set of seen paths spans all passes, so a color reachable twice (for
/// instance two shapes linked to the same effect) is reported once, at its
/// first discovery. Reported channels are always on the 0-255 scale.
pub fn scan_colors_with(document: &Value, options: &ScanOptions) -> Vec<LayerColors> {
    let mut scanner = ColorScanner {
        options,
        seen: HashSet::new(),
        layers: Vec::new(),
    };

    if let Some(layers) = document.get("layers").and_then(Value::as_array) {
        scanner.scan_pass(layers, "layers");
    }

    if options.include_assets {
        if let Some(assets) = document.get("assets").and_then(Value::as_array) {
            for (i, asset) in assets.iter().enumerate() {
                if let Some(layers) = asset.get("layers").and_then(Value::as_array) {
                    scanner.scan_pass(layers, &format!("assets.{i}.layers"));
                }
            }
        }
    }

    tracing::debug!(
        layers = scanner.layers.len(),
        colors = scanner.seen.len(),
        "scanned document colors"
    );
    scanner.layers
}

/// The scan flattened to a single list, in discovery order.
pub fn color_inventory(document: &Value) -> Vec<ColorInfo> {
    scan_colors(document)
        .into_iter()
        .flat_map(|layer| layer.shapes)
        .collect()
}

struct ColorScanner<'o> {
    options: &'o ScanOptions,
    seen: HashSet<String>,
    layers: Vec<LayerColors>,
}

impl ColorScanner<'_> {
    fn scan_pass(&mut self, layers: &[Value], base: &str) {
        let comp = CompObject::new(layers, base);

        for (layer_index, layer) in layers.iter().enumerate() {
            let Some(shapes) = layer.get("shapes").and_then(Value::as_array) else {
                continue;
            };
            let layer_path = join(base, layer_index);
            let mut found = Vec::new();

            for (shape_index, outer) in shapes.iter().enumerate() {
                let outer_path = format!("{layer_path}.shapes.{shape_index}");
                match outer.get("it").and_then(Value::as_array) {
                    Some(children) => {
                        for (child_index, child) in children.iter().enumerate() {
                            let path = format!("{outer_path}.it.{child_index}");
                            found.extend(self.shape_color(&comp, child, path));
                        }
                    }
                    None => found.extend(self.shape_color(&comp, outer, outer_path)),
                }
            }

            self.layers.push(LayerColors {
                name: name_of(layer),
                shapes: found,
            });
        }
    }

    fn shape_color(
        &mut self,
        comp: &CompObject<'_>,
        shape: &Value,
        path: String,
    ) -> Option<ColorInfo> {
        let kind = shape.get("ty").and_then(Value::as_str).and_then(ShapeKind::from_code)?;
        let color = shape.get("c")?;

        let linked = match color.get("x").and_then(Value::as_str) {
            Some(code) if self.options.resolve_expressions => match comp.evaluate(code) {
                Ok(Some(effect)) => effect.value().and_then(property_color).map(|(rgba, animated)| {
                    (effect.parent_name.clone(), effect.path.clone(), rgba, animated)
                }),
                Ok(None) => {
                    tracing::debug!(%path, "color expression unresolved, using stored value");
                    None
                }
                Err(err) => {
                    tracing::warn!(
                        %path,
                        error = %err,
                        "unsupported color expression, using stored value"
                    );
                    None
                }
            },
            _ => None,
        };

        let (name, path, rgba, animated) = match linked {
            Some(linked) => linked,
            None => {
                let Some((rgba, animated)) = color.get("k").and_then(property_color) else {
                    tracing::debug!(%path, "shape color has no readable value");
                    return None;
                };
                (name_of(shape), path, rgba, animated)
            }
        };

        if !self.seen.insert(path.clone()) {
            tracing::trace!(%path, "color already reported");
            return None;
        }

        tracing::trace!(%path, %rgba, "found color");
        Some(ColorInfo {
            name,
            kind,
            path,
            rgba,
            animated,
        })
    }
}

/// Color held by a property value: a literal array, or the first keyframe's
/// start value. The flag reports which.
fn property_color(k: &Value) -> Option<(Rgba, bool)> {
    if let Some(frames) = keyframes(k) {
        return frames
            .iter()
            .find_map(|frame| frame.get("s"))
            .and_then(read_color)
            .map(|rgba| (rgba, true));
    }
    read_color(k).map(|rgba| (rgba, false))
}

fn name_of(value: &Value) -> Option<String> {
    value.get("nm").and_then(Value::as_str).map(str::to_owned)
}
