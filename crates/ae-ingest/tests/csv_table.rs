use std::fs;

use tempfile::tempdir;

use ae_ingest::{read_csv_table, write_standard_csv, IngestError};
use ae_model::AeRecord;

#[test]
fn reads_table_with_bom_and_ragged_rows() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("ae.csv");
    fs::write(
        &path,
        "\u{feff}SUBJID,AETERM,AESEV\n101,Headache\n\n102,Nausea,MILD,extra\n",
    )
    .expect("write file");

    let table = read_csv_table(&path).expect("read csv");
    assert_eq!(table.headers, vec!["SUBJID", "AETERM", "AESEV"]);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0], vec!["101", "Headache", ""]);
    assert_eq!(table.rows[1], vec!["102", "Nausea", "MILD"]);
}

#[test]
fn latin1_source_decodes_transparently() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("ae_latin1.csv");
    fs::write(&path, b"SUBJID,AETERM\n101,c\xE9phal\xE9e\n").expect("write file");

    let table = read_csv_table(&path).expect("read csv");
    assert_eq!(table.rows[0][1], "céphalée");
}

#[test]
fn undecodable_bytes_fail_with_encoding_error() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("ae_binary.csv");
    fs::write(&path, b"SUBJID\n\x00\xE9\n").expect("write file");

    let error = read_csv_table(&path).expect_err("binary file must be rejected");
    assert!(matches!(error, IngestError::Encoding { .. }));
}

#[test]
fn empty_file_yields_empty_table() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("empty.csv");
    fs::write(&path, "").expect("write file");

    let table = read_csv_table(&path).expect("read csv");
    assert!(table.headers.is_empty());
    assert!(table.rows.is_empty());
    assert!(table.source_rows().is_empty());
}

#[test]
fn source_rows_expose_fields_by_header_name() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("ae.csv");
    fs::write(&path, "Subject Id,AETERM\n008-101,Headache\n").expect("write file");

    let table = read_csv_table(&path).expect("read csv");
    let rows = table.source_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("Subject Id"), "008-101");
    assert_eq!(rows[0].get("subject id"), "008-101");
    assert_eq!(rows[0].get("AESEV"), "");
}

#[test]
fn written_table_reads_back_in_column_order() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("ae_out.csv");
    let record = AeRecord {
        studyid: "ABC-001".to_string(),
        domain: "AE".to_string(),
        usubjid: "101".to_string(),
        aeseq: 1,
        aeterm: "HEADACHE".to_string(),
        aestdtc: "2023-01-15".to_string(),
        ..AeRecord::default()
    };
    write_standard_csv(&path, &[record]).expect("write csv");

    let table = read_csv_table(&path).expect("read csv");
    assert_eq!(table.headers.len(), 29);
    assert_eq!(table.headers[0], "STUDYID");
    assert_eq!(table.headers[28], "AECONTRT");
    assert_eq!(table.rows.len(), 1);
    let row = &table.source_rows()[0];
    assert_eq!(row.get("USUBJID"), "101");
    assert_eq!(row.get("AESEQ"), "1");
    assert_eq!(row.get("AESTDTC"), "2023-01-15");
}
