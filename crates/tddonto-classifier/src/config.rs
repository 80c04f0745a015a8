//! 分類器の設定

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Stop pairwise reduction at the first pair that is not entailed.
    /// Ignored while `check_additions` is on, which needs every failing pair.
    pub short_circuit_pairs: bool,
    /// Ask the reasoner whether adding each non-entailed part breaks the ontology
    pub check_additions: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            short_circuit_pairs: true,
            check_additions: true,
        }
    }
}

impl ClassifierConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Plain entailment check: ENTAILED or ABSENT once the background is healthy
    pub fn entailment_only() -> Self {
        Self {
            check_additions: false,
            ..Self::default()
        }
    }
}
