//! Tests for decoder orchestration

use std::sync::Arc;
use std::thread;

use super::super::decoder::CsvDecoder;
use super::*;
use crate::app::models::Contact;
use crate::app::services::name_splitter::{NameSplitter, ParsedName};
use crate::app::services::schema::CsvRecord;
use crate::config::{AnnotationPolicy, DecoderConfig, ShortRowPolicy};
use crate::{Error, Result};

#[test]
fn test_decode_rows_example() {
    let decoder = CsvDecoder::default();
    let result = decoder
        .decode_rows(&create_example_rows(), &create_mailing_schema())
        .unwrap();

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].phone, "(949) 323-7895");
    assert_eq!(result.records[0].zip, "92882");
    assert_eq!(result.records[0].zip4, "");

    assert_eq!(result.stats.data_rows, 1);
    assert_eq!(result.stats.records_decoded, 1);
    assert_eq!(result.stats.bound_fields, 3);
    assert_eq!(result.stats.unbound_fields, 1);
    assert_eq!(result.column_map.get("Phone"), Some(1));
}

#[test]
fn test_zero_rows_is_empty_input() {
    let decoder = CsvDecoder::default();
    let result = decoder.decode_rows(&[], &create_mailing_schema());
    assert!(matches!(result, Err(Error::EmptyInput)));

    let result = decoder.decode_reader("".as_bytes(), &create_mailing_schema());
    assert!(matches!(result, Err(Error::EmptyInput)));
}

#[test]
fn test_header_only_yields_no_records() {
    let decoder = CsvDecoder::default();
    let result = decoder
        .decode_rows(&[row(&["Name", "Phone"])], &create_mailing_schema())
        .unwrap();

    assert!(result.records.is_empty());
    assert_eq!(result.stats.data_rows, 0);
    assert!(result.stats.is_clean());
}

#[test]
fn test_duplicate_header_propagates() {
    let decoder = CsvDecoder::default();
    let result = decoder.decode_reader("Zip,Zip\n1,2\n".as_bytes(), &create_mailing_schema());
    assert!(matches!(result, Err(Error::DuplicateHeader { .. })));
}

#[test]
fn test_decode_reader_quoted_cells() {
    let input = "Name,First,Last,Note\n\"Doe, John\",,,\"a, b\"\n";
    let decoder = CsvDecoder::default();
    let result = decoder
        .decode_reader(input.as_bytes(), &create_full_schema())
        .unwrap();

    let record = &result.records[0];
    assert_eq!(record.full_name, "Doe, John");
    assert_eq!(record.first_name, "John");
    assert_eq!(record.last_name, "Doe");
    assert_eq!(record.note, "a, b");
}

#[test]
fn test_custom_delimiter() {
    let config = DecoderConfig {
        delimiter: ';',
        ..Default::default()
    };
    let decoder = CsvDecoder::new(config);
    let result = decoder
        .decode_reader("Name;Phone\njohn;323 7895\n".as_bytes(), &create_mailing_schema())
        .unwrap();

    assert_eq!(result.records[0].phone, "323-7895");
}

#[test]
fn test_invalid_config_rejected() {
    let config = DecoderConfig {
        delimiter: '"',
        ..Default::default()
    };
    let decoder = CsvDecoder::new(config);
    let result = decoder.decode_reader("Name\nx\n".as_bytes(), &create_mailing_schema());
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_strict_policy() {
    let config = DecoderConfig {
        annotation_policy: AnnotationPolicy::Strict,
        ..Default::default()
    };
    let decoder = CsvDecoder::new(config);
    let result = decoder
        .decode_rows(&create_example_rows(), &create_mailing_schema())
        .unwrap();

    // Only the phone field carries a directive
    assert_eq!(result.records[0].full_name, "");
    assert_eq!(result.records[0].zip, "");
    assert_eq!(result.records[0].phone, "(949) 323-7895");
    assert_eq!(result.stats.bound_fields, 1);
}

#[test]
fn test_short_row_policy_from_config() {
    let rows = vec![row(&["Name", "Phone", "Zip"]), row(&["john doe"])];

    let lenient = CsvDecoder::default().decode_rows(&rows, &create_mailing_schema()).unwrap();
    assert_eq!(lenient.stats.missing_cells, 2);
    assert_eq!(lenient.records[0].full_name, "john doe");

    let config = DecoderConfig {
        short_row_policy: ShortRowPolicy::Error,
        ..Default::default()
    };
    let strict = CsvDecoder::new(config).decode_rows(&rows, &create_mailing_schema());
    assert!(matches!(strict, Err(Error::ShortRow { row: 1, .. })));
}

#[test]
fn test_decode_with_record_schema() {
    let input = "Name,Phone,Zip\njohn doe,9493237895,92882-1234\n";
    let contacts: Vec<Contact> = CsvDecoder::default().decode(input.as_bytes()).unwrap();

    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].full_name, "John Doe");
    assert_eq!(contacts[0].first_name, "John");
    assert_eq!(contacts[0].last_name, "Doe");
    assert_eq!(contacts[0].phone, "(949) 323-7895");
    assert_eq!(contacts[0].zip, "92882");
    assert_eq!(contacts[0].zip4, "");
}

#[derive(Debug, Default)]
struct BadDirective {
    value: String,
}

impl CsvRecord for BadDirective {
    fn schema() -> Result<Schema<Self>> {
        Schema::builder()
            .field(
                FieldSpec::<Self>::text("Value", |r| r.value.as_str(), |r, v| r.value = v)
                    .format("xx"),
            )
            .build()
    }
}

#[test]
fn test_schema_error_fails_decode() {
    let result = CsvDecoder::default().decode::<BadDirective>("Value\n1\n".as_bytes());
    assert!(matches!(result, Err(Error::InvalidDirective { .. })));
}

#[test]
fn test_column_map_is_per_call() {
    let decoder = CsvDecoder::default();
    let schema = create_mailing_schema();

    let first = decoder
        .decode_rows(&[row(&["Zip", "Phone"]), row(&["92882", "3237895"])], &schema)
        .unwrap();
    let second = decoder
        .decode_rows(&[row(&["Phone", "Zip"]), row(&["3237895", "92882"])], &schema)
        .unwrap();

    assert_eq!(first.column_map.get("Zip"), Some(0));
    assert_eq!(second.column_map.get("Zip"), Some(1));
    assert_eq!(first.records[0], second.records[0]);
}

#[test]
fn test_shared_across_threads() {
    let decoder = Arc::new(CsvDecoder::default());
    let schema = Arc::new(create_mailing_schema());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let decoder = Arc::clone(&decoder);
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                let header = if i % 2 == 0 { ["Name", "Zip"] } else { ["Zip", "Name"] };
                let values = if i % 2 == 0 { ["n", "92882"] } else { ["92882", "n"] };
                let rows = vec![row(&header), row(&values)];
                decoder.decode_rows(&rows, &schema).unwrap().records
            })
        })
        .collect();

    for handle in handles {
        let records = handle.join().unwrap();
        assert_eq!(records[0].zip, "92882");
        assert_eq!(records[0].full_name, "n");
    }
}

#[derive(Debug)]
struct UpperSplitter;

impl NameSplitter for UpperSplitter {
    fn split(&self, full_name: &str) -> ParsedName {
        ParsedName {
            first: full_name.to_uppercase(),
            ..Default::default()
        }
    }
}

#[test]
fn test_with_name_splitter() {
    let decoder = CsvDecoder::default().with_name_splitter(Arc::new(UpperSplitter));
    let rows = vec![row(&["Name"]), row(&["ada"])];

    let result = decoder.decode_rows(&rows, &create_full_schema()).unwrap();
    assert_eq!(result.records[0].first_name, "ADA");
    assert_eq!(result.records[0].last_name, "");
}

#[test]
fn test_decode_file() {
    let file = create_temp_file("Name,Phone,Zip\njohn doe,9493237895,92882-1234\n");
    let decoder = CsvDecoder::default();

    let result = decoder
        .decode_file(file.path(), &create_mailing_schema())
        .unwrap();
    assert_eq!(result.records[0].zip, "92882");

    let missing = decoder.decode_file(
        std::path::Path::new("/nonexistent/contacts.csv"),
        &create_mailing_schema(),
    );
    match missing {
        Err(Error::Io { message, .. }) => assert!(message.contains("/nonexistent/contacts.csv")),
        other => panic!("expected I/O error, got {:?}", other.map(|r| r.records)),
    }
}
