// @file: placemark_engine/src/core/resolver.rs
// @description: Turns records into placemarks; owns geocoding retries, pacing and the in-run cache.
// @author: LAS.

use log::{debug, error, info, warn};
use std::collections::HashMap;
use tokio::time::{sleep, Duration};

use crate::core::error::{ConvertError, Result};
use crate::core::interfaces::{GeocodeOutcome, Geocoder};
use crate::core::models::{ColumnSpec, Placemark, Record, ResolveMode, RunSummary};
use crate::utils::config::AppConfig;


//
// HEADER VALIDATION
//

// Resolves the effective address column: the requested name when present,
// otherwise the first header containing "address" case-insensitively.
pub fn locate_address_column(headers: &[String], requested: &str) -> Result<String> {
    if headers.iter().any(|h| h == requested) {
        return Ok(requested.to_string());
    }

    headers
        .iter()
        .find(|h| h.to_lowercase().contains("address"))
        .cloned()
        .ok_or_else(|| {
            ConvertError::Input(format!(
                "column \"{}\" not found in CSV (available: {})",
                requested,
                headers.join(", ")
            ))
        })
}

pub fn require_column(headers: &[String], name: &str) -> Result<()> {
    if headers.iter().any(|h| h == name) {
        Ok(())
    } else {
        Err(ConvertError::Input(format!(
            "column \"{}\" not found in CSV (available: {})",
            name,
            headers.join(", ")
        )))
    }
}


//
// RESOLVER
//

pub struct Resolver {
    mode: ResolveMode,
    columns: ColumnSpec,
    headers: Vec<String>,
    geocoder: Option<Box<dyn Geocoder>>,

    // Retry/pacing knobs, sourced from AppConfig.
    retry_attempts: u32,
    retry_base_delay: Duration,
    request_delay: Duration,

    // One lookup per distinct address per run; failures are cached too so
    // duplicate rows do not re-hit the service.
    cache: HashMap<String, Option<(f64, f64)>>,
    made_request: bool,

    pub summary: RunSummary,
}

impl Resolver {
    //
    // INITIALIZATION
    //

    pub fn for_coordinates(columns: ColumnSpec, headers: Vec<String>, config: &AppConfig) -> Self {
        Self::build(ResolveMode::Coordinates, columns, headers, None, config)
    }

    pub fn for_geocoding(
        columns: ColumnSpec,
        headers: Vec<String>,
        geocoder: Box<dyn Geocoder>,
        config: &AppConfig,
    ) -> Self {
        Self::build(ResolveMode::Geocode, columns, headers, Some(geocoder), config)
    }

    fn build(
        mode: ResolveMode,
        columns: ColumnSpec,
        headers: Vec<String>,
        geocoder: Option<Box<dyn Geocoder>>,
        config: &AppConfig,
    ) -> Self {
        Resolver {
            mode,
            columns,
            headers,
            geocoder,
            retry_attempts: config.geocode_retry_attempts,
            retry_base_delay: Duration::from_millis(config.geocode_retry_base_delay_ms),
            request_delay: Duration::from_millis(config.geocode_request_delay_ms),
            cache: HashMap::new(),
            made_request: false,
            summary: RunSummary::default(),
        }
    }


    //
    // PUBLIC INTERFACE
    //

    // Produces zero or one placemark per record. Every skip path logs its
    // reason and bumps the skip counter; a skip never aborts the run.
    pub async fn resolve(&mut self, record: &Record) -> Option<Placemark> {
        let coords = match self.mode {
            ResolveMode::Coordinates => self.resolve_columns(record),
            ResolveMode::Geocode => self.resolve_geocode(record).await,
        };

        let Some((latitude, longitude)) = coords else {
            self.summary.skipped += 1;
            return None;
        };

        if !Placemark::bounds_ok(latitude, longitude) {
            warn!(
                "row {}: coordinates ({}, {}) out of range, dropping",
                record.row, latitude, longitude
            );
            self.summary.skipped += 1;
            return None;
        }

        let placemark = self.build_placemark(record, latitude, longitude);
        self.summary.resolved += 1;
        Some(placemark)
    }


    //
    // COORDINATE MODE
    //

    fn resolve_columns(&self, record: &Record) -> Option<(f64, f64)> {
        let raw = (
            record.get(&self.columns.latitude),
            record.get(&self.columns.longitude),
        );

        let (Some(lat_raw), Some(lon_raw)) = raw else {
            warn!("row {}: missing coordinate value, skipping", record.row);
            return None;
        };

        match (lat_raw.parse::<f64>(), lon_raw.parse::<f64>()) {
            (Ok(latitude), Ok(longitude)) => Some((latitude, longitude)),
            _ => {
                warn!(
                    "row {}: non-numeric coordinates \"{}\" / \"{}\", skipping",
                    record.row, lat_raw, lon_raw
                );
                None
            }
        }
    }


    //
    // GEOCODING MODE
    //

    async fn resolve_geocode(&mut self, record: &Record) -> Option<(f64, f64)> {
        let Some(address) = record.get(&self.columns.address) else {
            warn!("row {}: blank address, skipping", record.row);
            return None;
        };
        let address = address.to_string();

        if let Some(cached) = self.cache.get(&address) {
            debug!("row {}: cache hit for \"{}\"", record.row, address);
            return *cached;
        }

        let coords = self.lookup_with_retry(&address, record.row).await;
        self.cache.insert(address, coords);
        coords
    }

    async fn lookup_with_retry(&mut self, address: &str, row: usize) -> Option<(f64, f64)> {
        let mut backoff = self.retry_base_delay;

        for attempt in 1..=self.retry_attempts {
            self.pace().await;

            let outcome = match &self.geocoder {
                Some(geocoder) => {
                    info!(
                        "geocoding \"{}\" via {} (row {}, attempt {}/{})",
                        address,
                        geocoder.provider_name(),
                        row,
                        attempt,
                        self.retry_attempts
                    );
                    geocoder.resolve(address).await
                }
                None => return None,
            };

            match outcome {
                GeocodeOutcome::Found {
                    latitude,
                    longitude,
                } => return Some((latitude, longitude)),
                GeocodeOutcome::NotFound => {
                    warn!("row {}: no match for \"{}\", skipping", row, address);
                    return None;
                }
                GeocodeOutcome::RateLimited => {
                    warn!(
                        "rate limited while geocoding \"{}\" (attempt {}/{})",
                        address, attempt, self.retry_attempts
                    );
                }
                GeocodeOutcome::TransientError(reason) => {
                    warn!(
                        "transient failure geocoding \"{}\" (attempt {}/{}): {}",
                        address, attempt, self.retry_attempts, reason
                    );
                }
            }

            if attempt < self.retry_attempts {
                sleep(backoff).await;
                backoff *= 2;
            }
        }

        error!(
            "row {}: geocoding retries exhausted for \"{}\", skipping",
            row, address
        );
        None
    }

    // Sequential throttling between service calls. The first call goes
    // out immediately; every later one waits the configured delay.
    async fn pace(&mut self) {
        if self.made_request {
            sleep(self.request_delay).await;
        }
        self.made_request = true;
    }


    //
    // PLACEMARK ASSEMBLY
    //

    fn build_placemark(&self, record: &Record, latitude: f64, longitude: f64) -> Placemark {
        // #1. Name: configured column when usable, else a synthesized
        // ordinal among resolved placemarks.
        let name = self
            .columns
            .name
            .as_deref()
            .and_then(|c| record.get(c))
            .map(str::to_string)
            .unwrap_or_else(|| format!("Point {}", self.summary.resolved + 1));

        // #2. Description carries the address text when the row has one.
        let description = record.get(&self.columns.address).map(str::to_string);

        // #3. Remaining columns, header order, become ExtendedData.
        let extended = self
            .headers
            .iter()
            .filter(|h| !self.is_consumed_column(h))
            .filter_map(|h| record.get(h).map(|v| (h.clone(), v.to_string())))
            .collect();

        Placemark {
            name,
            latitude,
            longitude,
            description,
            extended,
        }
    }

    fn is_consumed_column(&self, header: &str) -> bool {
        if header == self.columns.address {
            return true;
        }
        if self.columns.name.as_deref() == Some(header) {
            return true;
        }
        match self.mode {
            ResolveMode::Coordinates => {
                header == self.columns.latitude || header == self.columns.longitude
            }
            ResolveMode::Geocode => false,
        }
    }
}
