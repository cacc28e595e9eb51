//! Serious-criteria flag derivation.
//!
//! SDTM carries seriousness as six independent flags (SDTMIG v3.4 Section
//! 6.2, AE domain assumptions). Source exports collapse them into loose
//! categorical text, so each flag is derived by an independent substring
//! test; one input may set several flags.

/// The six serious-criteria flags, each `"Y"` or `""`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SafetyFlags {
    pub aesdth: String,
    pub aeshosp: String,
    pub aeslife: String,
    pub aesdisab: String,
    pub aescong: String,
    pub aesmie: String,
}

impl SafetyFlags {
    /// True when at least one criterion flag is set.
    pub fn any(&self) -> bool {
        [
            &self.aesdth,
            &self.aeshosp,
            &self.aeslife,
            &self.aesdisab,
            &self.aescong,
            &self.aesmie,
        ]
        .into_iter()
        .any(|flag| flag == "Y")
    }
}

fn flag(set: bool) -> String {
    if set { "Y".to_string() } else { String::new() }
}

/// Derive the six flags from raw source text.
///
/// `serious_category` drives hospitalization, disability, congenital
/// anomaly, and medically-important; the outcome text drives death; the
/// severity text drives life-threatening. Tests are not mutually
/// exclusive and not ordered.
pub fn derive_safety_flags(serious_category: &str, outcome: &str, severity: &str) -> SafetyFlags {
    let category = serious_category.to_uppercase();
    let outcome = outcome.to_uppercase();
    let severity = severity.to_uppercase();

    SafetyFlags {
        aesdth: flag(outcome.contains("DEATH") || outcome.contains("DIED")),
        aeshosp: flag(category.contains("HOSPITALIZATION") || category.contains("PROLONGATION")),
        aeslife: flag(severity.contains("LIFE THREATENING")),
        aesdisab: flag(category.contains("DISAB")),
        aescong: flag(category.contains("CONGENITAL")),
        aesmie: flag(category.contains("MEDICALLY IMPORTANT")),
    }
}
