use lottie_core::{LottieResult, ScanOptions};
use lottie_data::model::{ColorInfo, LayerColors, ResolvedEffect, Rgba, TextInfo};
use serde_json::Value;

/// An owned animation document.
///
/// Mutating methods return a new `Document`; `self` is never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn from_json_str(json: &str) -> LottieResult<Self> {
        Ok(Self::from_value(serde_json::from_str(json)?))
    }

    pub fn from_json_slice(json: &[u8]) -> LottieResult<Self> {
        Ok(Self::from_value(serde_json::from_slice(json)?))
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    pub fn to_json_string(&self) -> LottieResult<String> {
        Ok(serde_json::to_string(&self.root)?)
    }

    pub fn has_text_layers(&self) -> bool {
        lottie_core::has_text_layers(&self.root)
    }

    pub fn scan_colors(&self) -> Vec<LayerColors> {
        lottie_core::scan_colors(&self.root)
    }

    pub fn scan_colors_with(&self, options: &ScanOptions) -> Vec<LayerColors> {
        lottie_core::scan_colors_with(&self.root, options)
    }

    pub fn colors(&self) -> Vec<ColorInfo> {
        lottie_core::color_inventory(&self.root)
    }

    pub fn texts(&self) -> Vec<TextInfo> {
        lottie_core::scan_texts(&self.root)
    }

    pub fn keyframe_colors(&self, path: &str) -> Option<Vec<Rgba>> {
        lottie_core::get_keyframe_colors(path, &self.root)
    }

    pub fn resolve_expression(&self, code: &str) -> LottieResult<Option<ResolvedEffect>> {
        lottie_core::resolve_expression(code, &self.root)
    }

    pub fn with_color(&self, rgba: Rgba, path: &str) -> LottieResult<Self> {
        lottie_core::replace_color(rgba, path, &self.root).map(Self::from_value)
    }

    pub fn with_keyframe_color(&self, rgba: Rgba, path: &str) -> LottieResult<Self> {
        lottie_core::replace_keyframe_color(rgba, path, &self.root).map(Self::from_value)
    }

    pub fn with_text(&self, text: &str, path: &str) -> LottieResult<Self> {
        lottie_core::replace_text(text, path, &self.root).map(Self::from_value)
    }
}

impl From<Value> for Document {
    fn from(root: Value) -> Self {
        Self::from_value(root)
    }
}

impl From<Document> for Value {
    fn from(document: Document) -> Self {
        document.into_value()
    }
}
