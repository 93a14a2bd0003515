// @file: placemark_engine/src/core/reader.rs
// @description: Lazy CSV record source; yields header-keyed rows in input order.
// @author: LAS.

use csv::{ReaderBuilder, StringRecordsIntoIter, Trim};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use crate::core::error::{ConvertError, Result};
use crate::core::models::Record;


//
// RECORD READER
//

pub struct RecordReader {
    headers: Vec<String>,
    inner: StringRecordsIntoIter<File>,
    row: usize,
}

impl RecordReader {
    //
    // INITIALIZATION
    //

    pub fn open(path: &Path) -> Result<Self> {
        // #1. Open with trimming enabled; flexible so short rows map to
        // missing fields instead of hard failures.
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_path(path)
            .map_err(|e| ConvertError::Input(format!("cannot open {}: {}", path.display(), e)))?;

        // #2. Capture the header row up front.
        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ConvertError::Input(format!("cannot read header row: {}", e)))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(ConvertError::Input(format!(
                "{} has no header row",
                path.display()
            )));
        }

        Ok(RecordReader {
            headers,
            inner: reader.into_records(),
            row: 0,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}


//
// LAZY ITERATION
//

impl Iterator for RecordReader {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = match self.inner.next()? {
                Ok(raw) => raw,
                // A row the CSV parser itself rejects means the source is
                // malformed, which is fatal.
                Err(e) => {
                    return Some(Err(ConvertError::Input(format!(
                        "malformed CSV row: {}",
                        e
                    ))))
                }
            };

            let fields: HashMap<String, String> = self
                .headers
                .iter()
                .zip(raw.iter())
                .map(|(h, v)| (h.clone(), v.to_string()))
                .collect();

            // Fully blank rows are skipped without counting.
            if fields.values().all(|v| v.trim().is_empty()) {
                continue;
            }

            self.row += 1;
            return Some(Ok(Record::new(self.row, fields)));
        }
    }
}
