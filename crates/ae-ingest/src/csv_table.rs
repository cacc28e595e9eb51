use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use ae_model::SourceRow;

use crate::encoding::{decode, detect_encoding, EncodingDetection};
use crate::error::{IngestError, Result};

/// Raw CSV contents: one header row plus data rows padded or truncated
/// to the header width.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Pairs every data row with the header names for field lookup.
    pub fn source_rows(&self) -> Vec<SourceRow> {
        self.rows
            .iter()
            .map(|row| {
                SourceRow::new(
                    self.headers
                        .iter()
                        .zip(row.iter())
                        .map(|(header, value)| (header.clone(), value.clone()))
                        .collect(),
                )
            })
            .collect()
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Load a source AE export. The first row is the header; blank rows are
/// skipped; ragged rows are padded with empty strings.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let bytes = fs::read(path).map_err(|source| IngestError::io(path, source))?;
    let text = match detect_encoding(&bytes) {
        EncodingDetection::Detected(encoding) => {
            debug!(path = %path.display(), encoding = encoding.as_str(), "decoding source file");
            decode(&bytes, encoding)
        }
        EncodingDetection::Failed { reason } => {
            return Err(IngestError::encoding(path, reason));
        }
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::csv(path, source))?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    if raw_rows.is_empty() {
        warn!(path = %path.display(), "source file has no header or data rows");
        return Ok(CsvTable {
            headers: Vec::new(),
            rows: Vec::new(),
        });
    }

    let headers: Vec<String> = raw_rows[0].iter().map(|value| normalize_header(value)).collect();
    let mut rows = Vec::new();
    for record in raw_rows.iter().skip(1) {
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            let value = record.get(idx).map(String::as_str).unwrap_or("");
            row.push(normalize_cell(value));
        }
        rows.push(row);
    }
    debug!(path = %path.display(), columns = headers.len(), rows = rows.len(), "loaded csv table");
    Ok(CsvTable { headers, rows })
}
