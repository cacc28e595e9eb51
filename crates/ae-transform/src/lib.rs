pub mod datetime;
pub mod safety;
pub mod transformer;
pub mod vocabulary;

pub use datetime::{canonicalize_date, date_precision, is_partial_iso_date, DatePrecision};
pub use safety::{derive_safety_flags, SafetyFlags};
pub use transformer::{
    RecordTransformer, SeriousnessPolicy, TransformNotice, TransformOptions, TransformOutput,
};
pub use vocabulary::VocabularyMapper;
