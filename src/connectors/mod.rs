// @file: placemark_engine/src/connectors/mod.rs
// @description: Factory module mapping a provider selection to a concrete geocoding client.
// @author: LAS.

pub mod nominatim;

use crate::core::interfaces::Geocoder;
use crate::core::models::GeocodeProvider;
use crate::utils::config::AppConfig;
use self::nominatim::NominatimClient;


//
// FACTORY FUNCTION
//

// New providers slot in here without touching the pipeline code.
pub fn build_geocoder(provider: GeocodeProvider, config: &AppConfig) -> Box<dyn Geocoder> {
    match provider {
        GeocodeProvider::Nominatim => Box::new(NominatimClient::new(config)),
    }
}
