pub mod csv_table;
pub mod encoding;
pub mod error;
pub mod writer;

pub use csv_table::{read_csv_table, CsvTable};
pub use encoding::{decode, detect_encoding, Encoding, EncodingDetection};
pub use error::{IngestError, Result};
pub use writer::write_standard_csv;
