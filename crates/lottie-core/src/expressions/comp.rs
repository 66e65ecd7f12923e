//! Accessor objects for `thisComp`, its layers and their effects.
//!
//! Each step of `layer(..).effect(..)(..)` maps to one object. A miss at any
//! step carries forward as an empty object, so later steps resolve to `None`
//! instead of failing.

use super::parser::LayerSelector;
use crate::path::join;
use lottie_data::model::ResolvedEffect;
use serde_json::Value;

/// The composition an expression runs against: a layer list and the document
/// path of that list (`layers`, `assets.3.layers`, ...).
pub struct CompObject<'a> {
    layers: &'a [Value],
    base: String,
}

impl<'a> CompObject<'a> {
    pub fn new(layers: &'a [Value], base: impl Into<String>) -> Self {
        Self {
            layers,
            base: base.into(),
        }
    }

    /// Composition over a document's top-level `layers`.
    pub fn from_document(document: &'a Value) -> Self {
        let layers = document
            .get("layers")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        Self::new(layers, "layers")
    }

    pub fn layers(&self) -> &'a [Value] {
        self.layers
    }

    /// `thisComp.layer(x)`. Only layers carrying an `ef` property take part:
    /// an index counts effect-bearing layers, a name picks the first match.
    pub fn layer(&self, selector: &LayerSelector) -> LayerObject<'a> {
        let mut effect_layers = self
            .layers
            .iter()
            .enumerate()
            .filter(|(_, layer)| layer.get("ef").is_some());

        let found = match selector {
            LayerSelector::Index(n) if n.fract() == 0.0 && *n >= 0.0 => {
                effect_layers.nth(*n as usize)
            }
            LayerSelector::Index(_) => None,
            LayerSelector::Name(name) => {
                effect_layers.find(|(_, layer)| name_of(layer) == Some(name.as_str()))
            }
        };

        if found.is_none() {
            tracing::debug!(?selector, "expression layer not found");
        }

        LayerObject {
            layer: found.map(|(raw, layer)| (join(&self.base, raw), layer)),
        }
    }
}

/// A selected layer, or the empty result of a failed lookup.
pub struct LayerObject<'a> {
    layer: Option<(String, &'a Value)>,
}

impl<'a> LayerObject<'a> {
    pub fn is_found(&self) -> bool {
        self.layer.is_some()
    }

    pub fn name(&self) -> Option<&'a str> {
        self.layer.as_ref().and_then(|(_, layer)| name_of(*layer))
    }

    /// `.effect(name)`: the first top-level effect with this name.
    pub fn effect(&self, name: &str) -> EffectObject<'a> {
        let Some((path, layer)) = &self.layer else {
            return EffectObject { outer: None };
        };
        let layer: &'a Value = *layer;
        let Some(effects) = layer.get("ef").and_then(Value::as_array) else {
            tracing::debug!(layer = ?name_of(layer), "expression layer has no effect list");
            return EffectObject { outer: None };
        };

        let outer = effects
            .iter()
            .position(|ef| name_of(ef) == Some(name))
            .map(|i| (format!("{path}.ef.{i}"), &effects[i]));
        if outer.is_none() {
            tracing::debug!(effect = name, "expression effect not found");
        }
        EffectObject { outer }
    }
}

/// The callable returned by `.effect(name)`.
pub struct EffectObject<'a> {
    outer: Option<(String, &'a Value)>,
}

impl<'a> EffectObject<'a> {
    pub fn is_found(&self) -> bool {
        self.outer.is_some()
    }

    /// Invoke with a child name: the first child effect with that name,
    /// tagged with its parent's name and the path of its value (`...v.k`).
    pub fn property(&self, name: &str) -> Option<ResolvedEffect> {
        let (path, outer) = self.outer.as_ref()?;
        let children = outer.get("ef").and_then(Value::as_array)?;
        let index = children.iter().position(|ef| name_of(ef) == Some(name));
        let Some(index) = index else {
            tracing::debug!(property = name, "expression property not found");
            return None;
        };

        Some(ResolvedEffect {
            effect: children[index].as_object()?.clone(),
            parent_name: name_of(outer).map(str::to_owned),
            path: format!("{path}.ef.{index}.v.k"),
        })
    }
}

fn name_of(value: &Value) -> Option<&str> {
    value.get("nm").and_then(Value::as_str)
}
