//! Ingredient list parsing and ingredient-based inference
//!
//! Lists follow INCI order, so position 0 is the most concentrated
//! ingredient. Only the first ten positions take part in scoring.

mod classifier;
pub mod knowledge;

pub use classifier::*;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static LABEL_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(ingredientes|composição|composition)[:\s]*").unwrap());

/// Ordered, normalized ingredient names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngredientList(Vec<String>);

impl IngredientList {
    /// Lowercase, treat `;` as `,`, drop a leading label and split into
    /// trimmed, non-empty tokens in their original order.
    pub fn parse(raw: &str) -> Self {
        let text = raw.to_lowercase().replace(';', ",");
        let text = LABEL_PREFIX_RE.replace(text.trim_start(), "");

        Self(
            text.split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The scored prefix paired with each position's weight.
    pub fn weighted(&self) -> impl Iterator<Item = (f64, &str)> + '_ {
        self.0
            .iter()
            .take(SCORED_POSITIONS)
            .enumerate()
            .map(|(i, ing)| (position_weight(i), ing.as_str()))
    }

    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}

impl<S: Into<String>> FromIterator<S> for IngredientList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
