//! Structured date extracted from free-text date fields

use serde::{Deserialize, Serialize};

/// Best-effort breakdown of a free-text date.
///
/// `month` is zero-based (0 = January). Parts that could not be
/// extracted stay `None`; `raw` always holds the original text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredDate {
    pub year: Option<String>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub raw: String,
}

impl StructuredDate {
    pub fn raw_only(text: &str) -> Self {
        Self {
            raw: text.to_string(),
            ..Self::default()
        }
    }
}
