// @file: placemark_engine/src/tests/support.rs
// @description: Shared fixtures: scripted geocoder stub, zero-delay config, record builders.
// @author: v5 helper

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::core::interfaces::{GeocodeOutcome, Geocoder};
use crate::core::models::{ColumnSpec, GeocodeProvider, Record};
use crate::utils::config::AppConfig;


//
// SCRIPTED GEOCODER
//

// Deterministic stand-in for the HTTP client. Each address maps to a
// queue of outcomes so retry sequences can be scripted; the last outcome
// repeats if the queue runs dry. Unscripted addresses resolve NotFound.
pub struct ScriptedGeocoder {
    outcomes: Mutex<HashMap<String, VecDeque<GeocodeOutcome>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedGeocoder {
    pub fn new() -> Self {
        ScriptedGeocoder {
            outcomes: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn script(self, address: &str, outcomes: Vec<GeocodeOutcome>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .insert(address.to_string(), outcomes.into());
        self
    }

    pub fn found(address: &str, latitude: f64, longitude: f64) -> Self {
        Self::new().script(
            address,
            vec![GeocodeOutcome::Found {
                latitude,
                longitude,
            }],
        )
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Geocoder for ScriptedGeocoder {
    async fn resolve(&self, address: &str) -> GeocodeOutcome {
        self.calls.lock().unwrap().push(address.to_string());

        let mut outcomes = self.outcomes.lock().unwrap();
        match outcomes.get_mut(address) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap_or(GeocodeOutcome::NotFound),
            None => GeocodeOutcome::NotFound,
        }
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}


//
// FIXTURE BUILDERS
//

// Zero-delay knobs so retry/pacing paths run instantly under test.
pub fn test_config() -> AppConfig {
    AppConfig {
        geocoder_provider: GeocodeProvider::Nominatim,
        geocoder_base_url: "http://localhost:0".to_string(),
        geocoder_user_agent: "placemark-engine-tests".to_string(),
        geocode_timeout_secs: 1,
        geocode_retry_attempts: 3,
        geocode_retry_base_delay_ms: 0,
        geocode_request_delay_ms: 0,
    }
}

pub fn default_columns() -> ColumnSpec {
    ColumnSpec {
        address: "Address".to_string(),
        name: None,
        latitude: "Latitude".to_string(),
        longitude: "Longitude".to_string(),
    }
}

pub fn named_columns(name: &str) -> ColumnSpec {
    ColumnSpec {
        name: Some(name.to_string()),
        ..default_columns()
    }
}

pub fn record(row: usize, pairs: &[(&str, &str)]) -> Record {
    let fields = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Record::new(row, fields)
}

pub fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}
