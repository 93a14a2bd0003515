// @file: placemark_engine/src/utils/config.rs
// @description: Service configuration with defaults, file and environment overrides.
// @author: LAS.

use serde::Deserialize;
use config::{Config, ConfigError, File, Environment};
use crate::core::models::GeocodeProvider;

//
// TYPE DEFINITIONS
//

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    // Geocoding Service
    pub geocoder_provider: GeocodeProvider,
    pub geocoder_base_url: String,
    pub geocoder_user_agent: String,

    // Request Limits
    pub geocode_timeout_secs: u64,
    pub geocode_retry_attempts: u32,
    pub geocode_retry_base_delay_ms: u64,
    pub geocode_request_delay_ms: u64,
}

impl AppConfig {
    //
    // PUBLIC INTERFACE
    //

    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            // Geocoding Endpoint
            .set_default("geocoder_provider", "nominatim")?
            .set_default("geocoder_base_url", "https://nominatim.openstreetmap.org")?
            .set_default("geocoder_user_agent", "placemark-engine/0.1")?

            // Request Limits
            .set_default("geocode_timeout_secs", 10)?
            .set_default("geocode_retry_attempts", 3)?
            .set_default("geocode_retry_base_delay_ms", 1000)?
            .set_default("geocode_request_delay_ms", 1000)?

            // File & Env Overrides
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("PLACEMARK"));

        let config = builder.build()?;
        config.try_deserialize()
    }
}
