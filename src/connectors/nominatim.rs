// @file: placemark_engine/src/connectors/nominatim.rs
// @description: HTTP client resolving addresses against a Nominatim-style search endpoint.
// @author: V5 Helper.

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::core::interfaces::{GeocodeOutcome, Geocoder};
use crate::utils::config::AppConfig;


//
// NOMINATIM WIRE MODEL
//

// Nominatim encodes coordinates as decimal strings.
#[derive(Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}


//
// CLIENT
//

pub struct NominatimClient {
    client: Client,
    base_url: String,
    user_agent: String,
    timeout: Duration,
}

impl NominatimClient {
    pub fn new(config: &AppConfig) -> Self {
        NominatimClient {
            client: Client::new(),
            base_url: config.geocoder_base_url.trim_end_matches('/').to_string(),
            user_agent: config.geocoder_user_agent.clone(),
            timeout: Duration::from_secs(config.geocode_timeout_secs),
        }
    }
}


//
// GEOCODER IMPLEMENTATION
//

#[async_trait]
impl Geocoder for NominatimClient {
    async fn resolve(&self, address: &str) -> GeocodeOutcome {
        // #1. Execute Request
        // Format: /search?q=<address>&format=json&limit=1
        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .header(USER_AGENT, self.user_agent.as_str())
            .timeout(self.timeout)
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                return GeocodeOutcome::TransientError("request timed out".to_string())
            }
            Err(e) => return GeocodeOutcome::TransientError(format!("request failed: {}", e)),
        };

        // #2. Map Status
        // 429 is the service telling us to back off; other failures are
        // treated as transient and retried by the resolver.
        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return GeocodeOutcome::RateLimited;
        }
        if !status.is_success() {
            return GeocodeOutcome::TransientError(format!("service returned {}", status));
        }

        // #3. Parse Response
        // The endpoint returns a JSON array of matches, best first.
        let places: Vec<NominatimPlace> = match response.json().await {
            Ok(p) => p,
            Err(e) => {
                return GeocodeOutcome::TransientError(format!("unexpected response body: {}", e))
            }
        };

        let Some(place) = places.into_iter().next() else {
            return GeocodeOutcome::NotFound;
        };

        match (place.lat.parse::<f64>(), place.lon.parse::<f64>()) {
            (Ok(latitude), Ok(longitude)) => GeocodeOutcome::Found {
                latitude,
                longitude,
            },
            _ => GeocodeOutcome::TransientError("malformed coordinates in response".to_string()),
        }
    }

    fn provider_name(&self) -> &str {
        "nominatim"
    }
}
