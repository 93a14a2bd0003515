// @file: placemark_engine/src/kml/document.rs
// @description: Immutable document value holding the title and resolved placemarks.
// @author: LAS.

use serde::Serialize;

use crate::core::models::Placemark;


//
// DOCUMENT
//

// Purely structural: placemarks arrive already validated and keep their
// input order. An empty placemark list still builds a document; whether
// that is reportable is the caller's call.
#[derive(Debug, Clone, Serialize)]
pub struct KmlDocument {
    title: String,
    placemarks: Vec<Placemark>,
}

impl KmlDocument {
    pub fn new(title: impl Into<String>, placemarks: Vec<Placemark>) -> Self {
        KmlDocument {
            title: title.into(),
            placemarks,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn placemarks(&self) -> &[Placemark] {
        &self.placemarks
    }

    pub fn len(&self) -> usize {
        self.placemarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placemarks.is_empty()
    }
}
