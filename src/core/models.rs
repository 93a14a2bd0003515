// @file: placemark_engine/src/core/models.rs
// @description: Centralized data structures for records, placemarks and run accounting.
// @author: LAS.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;


//
// OPERATING MODE
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolveMode {
    Geocode,
    Coordinates,
}


//
// GEOCODING PROVIDERS
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GeocodeProvider {
    Nominatim,
}

impl fmt::Display for GeocodeProvider {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}


//
// COLUMN SELECTION
//

// Which input columns feed which placemark fields. The address column is
// tracked in both modes so it can feed <description> even when geocoding
// is skipped.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub address: String,
    pub name: Option<String>,
    pub latitude: String,
    pub longitude: String,
}


//
// INPUT RECORDS
//

// One CSV data row keyed by header name. `row` is the 1-based position
// among data rows, used for skip diagnostics.
#[derive(Debug, Clone)]
pub struct Record {
    pub row: usize,
    fields: HashMap<String, String>,
}

impl Record {
    pub fn new(row: usize, fields: HashMap<String, String>) -> Self {
        Record { row, fields }
    }

    // Returns the field only when present and non-blank.
    pub fn get(&self, column: &str) -> Option<&str> {
        match self.fields.get(column) {
            Some(value) if !value.trim().is_empty() => Some(value.trim()),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.fields.values().all(|v| v.trim().is_empty())
    }
}


//
// RESOLVED PLACEMARKS
//

#[derive(Debug, Clone, Serialize)]
pub struct Placemark {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: Option<String>,
    // Leftover columns in header order, emitted as <ExtendedData>.
    pub extended: Vec<(String, String)>,
}

impl Placemark {
    // WGS84 bounds. A placemark outside these never reaches the output.
    pub fn bounds_ok(latitude: f64, longitude: f64) -> bool {
        (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
    }

    // KML coordinate string: longitude first, zero altitude.
    pub fn coordinate_string(&self) -> String {
        format!("{},{},0", self.longitude, self.latitude)
    }
}


//
// RUN ACCOUNTING
//

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RunSummary {
    pub resolved: usize,
    pub skipped: usize,
}

impl RunSummary {
    pub fn rows_seen(&self) -> usize {
        self.resolved + self.skipped
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} resolved, {} skipped", self.resolved, self.skipped)
    }
}
