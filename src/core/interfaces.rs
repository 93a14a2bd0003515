// @file: placemark_engine/src/core/interfaces.rs
// @description: Defines the geocoding capability trait consumed by the resolver.
// @author: LAS.

use async_trait::async_trait;

//
// OUTCOME VARIANTS
//

// Structured result of one lookup. RateLimited and TransientError are the
// retryable variants; NotFound is final for the address.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeOutcome {
    Found { latitude: f64, longitude: f64 },
    NotFound,
    RateLimited,
    TransientError(String),
}


//
// TRAIT DEFINITIONS
//

#[async_trait]
pub trait Geocoder: Send + Sync {
    // #1. Resolve a free-text address to coordinates.
    // The implementation owns its timeout; expiry surfaces as TransientError.
    async fn resolve(&self, address: &str) -> GeocodeOutcome;

    // #2. Human-readable provider label for logs.
    fn provider_name(&self) -> &str;
}
