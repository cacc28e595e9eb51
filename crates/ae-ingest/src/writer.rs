use std::path::Path;

use csv::WriterBuilder;
use tracing::info;

use ae_model::{AeRecord, COLUMN_ORDER};

use crate::error::{IngestError, Result};

/// Write the standardized AE table as UTF-8 CSV in [`COLUMN_ORDER`].
pub fn write_standard_csv(path: &Path, records: &[AeRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .map_err(|source| IngestError::csv(path, source))?;
    writer
        .write_record(COLUMN_ORDER)
        .map_err(|source| IngestError::csv(path, source))?;
    for record in records {
        writer
            .write_record(record.to_row())
            .map_err(|source| IngestError::csv(path, source))?;
    }
    writer
        .flush()
        .map_err(|source| IngestError::io(path, source))?;
    info!(path = %path.display(), records = records.len(), "wrote standardized AE table");
    Ok(())
}
