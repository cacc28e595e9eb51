//! Controlled-terminology normalization for AE qualifier variables.

use ae_model::Vocabulary;
use tracing::debug;

/// Maps raw qualifier values onto their submission terms.
///
/// Thin stateless front over [`Vocabulary`]: upper-cases, looks up, and
/// passes unrecognized tokens through unchanged so no information is
/// dropped before validation.
#[derive(Debug, Clone, Default)]
pub struct VocabularyMapper {
    vocabulary: Vocabulary,
}

impl VocabularyMapper {
    pub fn new(vocabulary: Vocabulary) -> Self {
        VocabularyMapper { vocabulary }
    }

    /// Map one raw value for `variable`. Idempotent: mapping an already
    /// mapped value returns it unchanged.
    pub fn map(&self, variable: &str, raw: &str) -> String {
        let mapped = self.vocabulary.map_value(variable, raw);
        if !mapped.is_empty() && !self.vocabulary.recognizes(variable, raw) {
            debug!(variable, raw, "no terminology match, keeping value");
        }
        mapped
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}
