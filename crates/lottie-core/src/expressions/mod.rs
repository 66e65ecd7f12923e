//! Resolution of expression-driven colors.
//!
//! Bodymovin exports colors linked to an effect control as an expression such
//! as `thisComp.layer('settings').effect('Fill 3')('Color')`. This module
//! recognizes exactly that accessor idiom and walks the document's own
//! layer/effect graph to find the effect holding the value. The expression is
//! parsed, never executed; any other expression shape is reported as
//! [`LottieError::UnsupportedExpression`](crate::LottieError::UnsupportedExpression).

pub mod comp;
pub mod lexer;
pub mod parser;

pub use comp::{CompObject, EffectObject, LayerObject};
pub use parser::{parse, EffectAccessor, LayerSelector};

use crate::error::LottieResult;
use lottie_data::model::ResolvedEffect;
use serde_json::Value;

impl CompObject<'_> {
    /// Parse `code` and walk the accessor chain against this composition.
    ///
    /// `Ok(None)` when a layer, effect or property lookup misses.
    pub fn evaluate(&self, code: &str) -> LottieResult<Option<ResolvedEffect>> {
        let accessor = parse(code)?;
        Ok(self
            .layer(&accessor.layer)
            .effect(&accessor.effect)
            .property(&accessor.property))
    }
}

/// Resolve an expression against a document's top-level layers.
pub fn resolve_expression(code: &str, document: &Value) -> LottieResult<Option<ResolvedEffect>> {
    CompObject::from_document(document).evaluate(code)
}
