//! Independent rule groups over the standardized table.
//!
//! Each group is a pure function from the immutable table to a list of
//! issues; no group reads another's output, so callers may run them in any
//! order or concurrently and concatenate.

pub mod consistency;
pub mod dates;
pub mod sequence;
pub mod structural;
pub mod terminology;

use ae_model::AeRecord;

/// Locator string naming the record a finding concerns.
pub(crate) fn record_context(record: &AeRecord) -> String {
    format!("USUBJID={}, AESEQ={}", record.usubjid, record.aeseq)
}
