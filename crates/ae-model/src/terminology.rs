use std::collections::{BTreeMap, BTreeSet};

/// Controlled-terminology configuration for the AE qualifier variables.
///
/// Holds, per variable, a mapping from accepted upper-cased source tokens to
/// one submission term, plus the permissible set the validator checks.
/// Every mapping target is also inserted as a key mapping to itself, so
/// re-mapping an already-mapped value is a fixed point. The tables are
/// read-only after construction and safe to share across threads.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    mappings: BTreeMap<String, BTreeMap<String, String>>,
    permissible: BTreeMap<String, BTreeSet<String>>,
}

/// Submission values for AESEV.
pub const SEVERITY_TERMS: [&str; 4] = ["MILD", "MODERATE", "SEVERE", "LIFE THREATENING"];

/// Submission values for AEOUT.
pub const OUTCOME_TERMS: [&str; 6] = [
    "RECOVERED/RESOLVED",
    "RECOVERING/RESOLVING",
    "NOT RECOVERED/NOT RESOLVED",
    "RECOVERED/RESOLVED WITH SEQUELAE",
    "FATAL",
    "UNKNOWN",
];

/// Submission values for the No Yes Response codelist (AESER and the
/// safety-criteria flags).
pub const NY_TERMS: [&str; 2] = ["N", "Y"];

impl Vocabulary {
    /// Tables matching SDTM controlled terminology for the AE qualifiers.
    pub fn standard() -> Self {
        let mut vocabulary = Vocabulary {
            mappings: BTreeMap::new(),
            permissible: BTreeMap::new(),
        };

        vocabulary.add_mapping(
            "AESEV",
            &[
                ("MILD", "MILD"),
                ("MODERATE", "MODERATE"),
                ("SEVERE", "SEVERE"),
                ("LIFE THREATENING", "LIFE THREATENING"),
                ("LIFE-THREATENING", "LIFE THREATENING"),
            ],
        );
        vocabulary.add_mapping(
            "AEOUT",
            &[
                ("RESOLVED", "RECOVERED/RESOLVED"),
                ("RECOVERED", "RECOVERED/RESOLVED"),
                ("RESOLVING", "RECOVERING/RESOLVING"),
                ("RECOVERING", "RECOVERING/RESOLVING"),
                ("CONTINUING", "NOT RECOVERED/NOT RESOLVED"),
                ("ONGOING", "NOT RECOVERED/NOT RESOLVED"),
                ("NOT RESOLVED", "NOT RECOVERED/NOT RESOLVED"),
                ("RESOLVED WITH SEQUELAE", "RECOVERED/RESOLVED WITH SEQUELAE"),
                ("PATIENT DIED", "FATAL"),
                ("DIED", "FATAL"),
                ("DEATH", "FATAL"),
                ("UNKNOWN", "UNKNOWN"),
            ],
        );
        vocabulary.add_mapping(
            "AEACN",
            &[
                ("NONE", "DOSE NOT CHANGED"),
                ("NO CHANGE", "DOSE NOT CHANGED"),
                ("INTERRUPTED", "DRUG INTERRUPTED"),
                ("DISCONTINUED", "DRUG WITHDRAWN"),
                ("WITHDRAWN", "DRUG WITHDRAWN"),
                ("REDUCED", "DOSE REDUCED"),
                ("INCREASED", "DOSE INCREASED"),
                ("NOT APPLICABLE", "NOT APPLICABLE"),
                ("UNKNOWN", "UNKNOWN"),
            ],
        );
        vocabulary.add_mapping(
            "AEREL",
            &[
                ("UNRELATED", "NOT RELATED"),
                ("NOT RELATED", "NOT RELATED"),
                ("UNLIKELY", "UNLIKELY RELATED"),
                ("POSSIBLE", "POSSIBLY RELATED"),
                ("PROBABLE", "PROBABLY RELATED"),
                ("DEFINITE", "RELATED"),
                ("RELATED", "RELATED"),
            ],
        );

        vocabulary.set_permissible("AESEV", &SEVERITY_TERMS);
        vocabulary.set_permissible("AEOUT", &OUTCOME_TERMS);
        vocabulary.set_permissible("AESER", &NY_TERMS);

        vocabulary
    }

    /// Map a raw source value for `variable` onto its submission term.
    ///
    /// The input is trimmed and upper-cased before lookup. Unrecognized
    /// values (and unrecognized variables) come back upper-cased but
    /// otherwise unchanged; conformance is the validator's concern.
    pub fn map_value(&self, variable: &str, raw: &str) -> String {
        let token = raw.trim().to_uppercase();
        if token.is_empty() {
            return token;
        }
        let Some(table) = self.mappings.get(&variable.to_uppercase()) else {
            return token;
        };
        table.get(&token).cloned().unwrap_or(token)
    }

    /// True when the upper-cased token is a known key in the mapping table
    /// for `variable`.
    pub fn recognizes(&self, variable: &str, raw: &str) -> bool {
        self.mappings
            .get(&variable.to_uppercase())
            .is_some_and(|table| table.contains_key(&raw.trim().to_uppercase()))
    }

    /// Permissible submission values for `variable`, when one is defined.
    pub fn permissible_terms(&self, variable: &str) -> Option<&BTreeSet<String>> {
        self.permissible.get(&variable.to_uppercase())
    }

    /// True when `value` belongs to the permissible set for `variable`.
    /// Variables without a defined set accept any value.
    pub fn is_permissible(&self, variable: &str, value: &str) -> bool {
        match self.permissible_terms(variable) {
            Some(terms) => terms.contains(value),
            None => true,
        }
    }

    /// Replace the mapping table for one variable, e.g. a per-study
    /// causality scale. Targets gain identity entries like the defaults.
    pub fn with_mapping(mut self, variable: &str, entries: &[(&str, &str)]) -> Self {
        self.mappings.remove(&variable.to_uppercase());
        self.add_mapping(variable, entries);
        self
    }

    /// Replace the permissible set for one variable.
    pub fn with_permissible(mut self, variable: &str, terms: &[&str]) -> Self {
        self.set_permissible(variable, terms);
        self
    }

    fn add_mapping(&mut self, variable: &str, entries: &[(&str, &str)]) {
        let table = self.mappings.entry(variable.to_uppercase()).or_default();
        for (token, term) in entries {
            table.insert(token.to_uppercase(), term.to_uppercase());
        }
        // Identity entries keep the mapping idempotent.
        let targets: Vec<String> = table.values().cloned().collect();
        for target in targets {
            table.entry(target.clone()).or_insert(target);
        }
    }

    fn set_permissible(&mut self, variable: &str, terms: &[&str]) {
        self.permissible.insert(
            variable.to_uppercase(),
            terms.iter().map(|term| term.to_uppercase()).collect(),
        );
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary::standard()
    }
}
