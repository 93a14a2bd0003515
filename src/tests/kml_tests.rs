// @file: placemark_engine/src/tests/kml_tests.rs
// @description: KML rendering: structure, ordering, escaping, idempotence, atomic writes.
// @author: LAS.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::core::error::ConvertError;
use crate::core::models::Placemark;
use crate::kml::document::KmlDocument;
use crate::kml::writer;


//
// FIXTURES
//

fn placemark(name: &str, latitude: f64, longitude: f64) -> Placemark {
    Placemark {
        name: name.to_string(),
        latitude,
        longitude,
        description: None,
        extended: Vec::new(),
    }
}

fn assert_well_formed(rendered: &str) {
    let mut reader = quick_xml::Reader::from_str(rendered);
    loop {
        match reader.read_event() {
            Ok(quick_xml::events::Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("output is not well-formed XML: {}", e),
        }
    }
}


//
// TESTS
//

#[test]
fn renders_placemarks_in_input_order() {
    let document = KmlDocument::new(
        "trip",
        vec![
            placemark("First", 1.0, 2.0),
            placemark("Second", 3.0, 4.0),
            placemark("Third", 5.0, 6.0),
        ],
    );

    let rendered = writer::render(&document).unwrap();
    assert_eq!(rendered.matches("<Placemark>").count(), 3);

    let first = rendered.find("First").unwrap();
    let second = rendered.find("Second").unwrap();
    let third = rendered.find("Third").unwrap();
    assert!(first < second && second < third);
    assert_well_formed(&rendered);
}

#[test]
fn coordinates_are_lon_lat_zero() {
    let document = KmlDocument::new(
        "liberty",
        vec![placemark("Statue of Liberty", 40.6892, -74.0445)],
    );

    let rendered = writer::render(&document).unwrap();
    assert!(rendered.contains("<coordinates>-74.0445,40.6892,0</coordinates>"));
}

#[test]
fn document_title_lands_in_name_element() {
    let document = KmlDocument::new("field survey", Vec::new());
    let rendered = writer::render(&document).unwrap();

    assert!(rendered.contains("<name>field survey</name>"));
    assert!(rendered.contains("http://www.opengis.net/kml/2.2"));
}

#[test]
fn reserved_characters_are_escaped() {
    let mut subject = placemark("Joe's \"Cafe\" <& Grill>", 10.0, 20.0);
    subject.description = Some("corner of 1st & Main".to_string());

    let document = KmlDocument::new("escapes", vec![subject]);
    let rendered = writer::render(&document).unwrap();

    assert!(rendered.contains("Joe&apos;s &quot;Cafe&quot; &lt;&amp; Grill&gt;"));
    assert!(rendered.contains("corner of 1st &amp; Main"));
    assert!(!rendered.contains("Joe's"));
    assert_well_formed(&rendered);
}

#[test]
fn extended_data_renders_as_data_value_pairs() {
    let mut subject = placemark("Library", 47.6, -122.33);
    subject.extended = vec![
        ("City".to_string(), "Seattle".to_string()),
        ("Phone".to_string(), "555-0100".to_string()),
    ];

    let rendered = writer::render(&KmlDocument::new("extended", vec![subject])).unwrap();
    assert!(rendered.contains("<Data name=\"City\">"));
    assert!(rendered.contains("<value>Seattle</value>"));
    assert!(rendered.contains("<Data name=\"Phone\">"));
    assert_well_formed(&rendered);
}

#[test]
fn rendering_is_idempotent() {
    let document = KmlDocument::new("stable", vec![placemark("Only", 1.5, -2.5)]);
    assert_eq!(
        writer::render(&document).unwrap(),
        writer::render(&document).unwrap()
    );
}

#[test]
fn empty_document_renders_without_placemarks() {
    let rendered = writer::render(&KmlDocument::new("empty", Vec::new())).unwrap();
    assert_eq!(rendered.matches("<Placemark>").count(), 0);
    assert_well_formed(&rendered);
}

#[test]
fn write_file_persists_the_full_render() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.kml");
    let document = KmlDocument::new("persisted", vec![placemark("Only", 1.0, 2.0)]);

    writer::write_file(&document, &path).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        writer::render(&document).unwrap()
    );
}

#[test]
fn unwritable_destination_is_an_output_error() {
    let document = KmlDocument::new("nowhere", Vec::new());
    let err = writer::write_file(&document, &PathBuf::from("/no/such/dir/out.kml")).unwrap_err();
    assert!(matches!(err, ConvertError::Output(_)));
}
