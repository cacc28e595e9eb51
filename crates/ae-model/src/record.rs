use serde::{Deserialize, Serialize};

use crate::source::SourceRow;

/// Fixed domain code for adverse event records per SDTMIG v3.4 Section 6.2.
pub const DOMAIN_CODE: &str = "AE";

/// Standardized AE column order as written to output tables.
/// Identifiers, topic/coding hierarchy, timing, qualifiers, safety flags.
pub const COLUMN_ORDER: [&str; 29] = [
    "STUDYID", "DOMAIN", "USUBJID", "AESEQ", "AETERM", "AEDECOD", "AELLT", "AELLTCD", "AEPTCD",
    "AEHLT", "AEHLTCD", "AEHLGT", "AEHLGTCD", "AEBODSYS", "AEBDSYCD", "AESTDTC", "AEENDTC",
    "AESEV", "AESER", "AEREL", "AEACN", "AEOUT", "AESDTH", "AESHOSP", "AESLIFE", "AESDISAB",
    "AESCONG", "AESMIE", "AECONTRT",
];

/// Variables that must be non-empty in every record.
pub const REQUIRED_VARIABLES: [&str; 6] =
    ["STUDYID", "DOMAIN", "USUBJID", "AESEQ", "AETERM", "AESTDTC"];

/// One standardized adverse event record.
///
/// Date fields hold partial ISO 8601 strings (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`)
/// or the empty string. Safety-criteria flags hold `"Y"` or the empty string.
/// `(usubjid, aeseq)` must be unique across a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AeRecord {
    pub studyid: String,
    pub domain: String,
    pub usubjid: String,
    pub aeseq: i64,
    pub aeterm: String,
    pub aedecod: String,
    pub aellt: String,
    pub aelltcd: String,
    pub aeptcd: String,
    pub aehlt: String,
    pub aehltcd: String,
    pub aehlgt: String,
    pub aehlgtcd: String,
    pub aebodsys: String,
    pub aebdsycd: String,
    pub aestdtc: String,
    pub aeendtc: String,
    pub aesev: String,
    pub aeser: String,
    pub aerel: String,
    pub aeacn: String,
    pub aeout: String,
    pub aesdth: String,
    pub aeshosp: String,
    pub aeslife: String,
    pub aesdisab: String,
    pub aescong: String,
    pub aesmie: String,
    pub aecontrt: String,
}

impl AeRecord {
    /// Serialize the record as one output row following [`COLUMN_ORDER`].
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.studyid.clone(),
            self.domain.clone(),
            self.usubjid.clone(),
            self.aeseq.to_string(),
            self.aeterm.clone(),
            self.aedecod.clone(),
            self.aellt.clone(),
            self.aelltcd.clone(),
            self.aeptcd.clone(),
            self.aehlt.clone(),
            self.aehltcd.clone(),
            self.aehlgt.clone(),
            self.aehlgtcd.clone(),
            self.aebodsys.clone(),
            self.aebdsycd.clone(),
            self.aestdtc.clone(),
            self.aeendtc.clone(),
            self.aesev.clone(),
            self.aeser.clone(),
            self.aerel.clone(),
            self.aeacn.clone(),
            self.aeout.clone(),
            self.aesdth.clone(),
            self.aeshosp.clone(),
            self.aeslife.clone(),
            self.aesdisab.clone(),
            self.aescong.clone(),
            self.aesmie.clone(),
            self.aecontrt.clone(),
        ]
    }

    /// Look up a field by its standardized variable name (case-insensitive).
    /// Returns `None` for names outside [`COLUMN_ORDER`].
    pub fn value(&self, variable: &str) -> Option<String> {
        let index = COLUMN_ORDER
            .iter()
            .position(|name| name.eq_ignore_ascii_case(variable))?;
        let mut row = self.to_row();
        Some(row.swap_remove(index))
    }

    /// Rebuild a record from an already-standardized row, e.g. when
    /// re-validating a table written by an earlier run. Field names are
    /// matched case-insensitively; absent fields stay empty and a
    /// non-numeric sequence value degrades to 0 so the structural check
    /// reports it rather than aborting the load.
    pub fn from_source(row: &SourceRow) -> Self {
        AeRecord {
            studyid: row.get("STUDYID").to_string(),
            domain: row.get("DOMAIN").to_string(),
            usubjid: row.get("USUBJID").to_string(),
            aeseq: row.get("AESEQ").trim().parse().unwrap_or(0),
            aeterm: row.get("AETERM").to_string(),
            aedecod: row.get("AEDECOD").to_string(),
            aellt: row.get("AELLT").to_string(),
            aelltcd: row.get("AELLTCD").to_string(),
            aeptcd: row.get("AEPTCD").to_string(),
            aehlt: row.get("AEHLT").to_string(),
            aehltcd: row.get("AEHLTCD").to_string(),
            aehlgt: row.get("AEHLGT").to_string(),
            aehlgtcd: row.get("AEHLGTCD").to_string(),
            aebodsys: row.get("AEBODSYS").to_string(),
            aebdsycd: row.get("AEBDSYCD").to_string(),
            aestdtc: row.get("AESTDTC").to_string(),
            aeendtc: row.get("AEENDTC").to_string(),
            aesev: row.get("AESEV").to_string(),
            aeser: row.get("AESER").to_string(),
            aerel: row.get("AEREL").to_string(),
            aeacn: row.get("AEACN").to_string(),
            aeout: row.get("AEOUT").to_string(),
            aesdth: row.get("AESDTH").to_string(),
            aeshosp: row.get("AESHOSP").to_string(),
            aeslife: row.get("AESLIFE").to_string(),
            aesdisab: row.get("AESDISAB").to_string(),
            aescong: row.get("AESCONG").to_string(),
            aesmie: row.get("AESMIE").to_string(),
            aecontrt: row.get("AECONTRT").to_string(),
        }
    }
}
