//! Tests for header-to-field binding

use super::super::column_mapping::{ColumnMap, check_duplicate_headers};
use super::*;
use crate::Error;
use crate::config::AnnotationPolicy;

#[test]
fn test_bind_example_header() {
    let schema = create_mailing_schema();
    let header = row(&["Name", "Phone", "Zip"]);

    let map = ColumnMap::bind(&header, &schema, AnnotationPolicy::PassThrough).unwrap();

    assert_eq!(map.get("Name"), Some(0));
    assert_eq!(map.get("Phone"), Some(1));
    assert_eq!(map.get("Zip"), Some(2));
    assert_eq!(map.get("Zip4"), None);
    assert_eq!(map.len(), 3);
    assert_eq!(map.unbound_fields(&schema), vec!["Zip4"]);
}

#[test]
fn test_duplicate_header_rejected() {
    let schema = create_mailing_schema();

    // Rejected even when no field binds to the repeated cell
    let header = row(&["Name", "Extra", "Extra"]);
    let result = ColumnMap::bind(&header, &schema, AnnotationPolicy::PassThrough);
    assert!(matches!(
        result,
        Err(Error::DuplicateHeader { ref name }) if name == "Extra"
    ));

    assert!(check_duplicate_headers(&row(&["a", "b", "A"])).is_ok());
    assert!(check_duplicate_headers(&[]).is_ok());
}

#[test]
fn test_last_matching_column_wins() {
    let schema = Schema::builder()
        .field(phone_field().binding("(?i)phone"))
        .build()
        .unwrap();
    let header = row(&["Home Phone", "Email", "Work Phone"]);

    let map = ColumnMap::bind(&header, &schema, AnnotationPolicy::PassThrough).unwrap();
    assert_eq!(map.get("Phone"), Some(2));
}

#[test]
fn test_default_binding_is_unanchored() {
    // "Zip" without a binding tag also matches the "Zip4" header
    let schema = create_mailing_schema();
    let header = row(&["Zip", "Zip4"]);

    let map = ColumnMap::bind(&header, &schema, AnnotationPolicy::PassThrough).unwrap();
    assert_eq!(map.get("Zip"), Some(1));
    assert_eq!(map.get("Zip4"), Some(1));
}

#[test]
fn test_one_column_feeds_several_fields() {
    let schema = Schema::builder()
        .field(full_name_field().binding("Name"))
        .field(note_field().binding("Name"))
        .build()
        .unwrap();

    let map = ColumnMap::bind(&row(&["Name"]), &schema, AnnotationPolicy::PassThrough).unwrap();
    assert_eq!(map.get("Name"), Some(0));
    assert_eq!(map.get("Note"), Some(0));
}

#[test]
fn test_strict_policy_skips_unannotated_fields() {
    let schema = create_full_schema();
    let header = row(&["Name", "Phone", "Zip", "Note", "Joined"]);

    let passthrough = ColumnMap::bind(&header, &schema, AnnotationPolicy::PassThrough).unwrap();
    assert!(passthrough.contains("Name"));
    assert!(passthrough.contains("Note"));
    assert!(passthrough.contains("Joined"));

    let strict = ColumnMap::bind(&header, &schema, AnnotationPolicy::Strict).unwrap();
    assert!(strict.contains("Phone"));
    assert!(!strict.contains("Name"));
    assert!(!strict.contains("Note"));
    // Temporal fields need an explicit binding tag under the strict policy
    assert!(!strict.contains("Joined"));

    let tagged = Schema::builder()
        .field(joined_field().binding("-"))
        .build()
        .unwrap();
    let strict = ColumnMap::bind(&header, &tagged, AnnotationPolicy::Strict).unwrap();
    assert_eq!(strict.get("Joined"), Some(4));
}

#[test]
fn test_bindings_in_column_order() {
    let schema = create_full_schema();
    let header = row(&["Joined", "Zip", "Name"]);

    let map = ColumnMap::bind(&header, &schema, AnnotationPolicy::PassThrough).unwrap();
    assert_eq!(map.bindings(), vec![("Joined", 0), ("Zip", 1), ("Name", 2)]);
}
