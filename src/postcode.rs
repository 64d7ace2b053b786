//! UK postcode validation, normalization, and geocoding
//!
//! The geocoding client speaks the postcodes.io response shape. The base
//! URL is configurable so tests can point it at a local mock server.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::config::GeocodingConfig;
use crate::error::CartPilotError;
use crate::models::Coordinates;
use crate::Result;

/// UK postcode shape: 1-2 letters, a digit, an optional letter or digit,
/// an optional space, then a digit and 2 letters.
static POSTCODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z]{1,2}[0-9][A-Z0-9]?\s?[0-9][A-Z]{2}$").expect("postcode regex")
});

/// Check whether a string has the shape of a UK postcode
#[must_use]
pub fn is_valid_postcode(postcode: &str) -> bool {
    POSTCODE_RE.is_match(postcode.trim())
}

/// Canonical form: no internal whitespace, uppercase, one space before
/// the final three characters. Idempotent for valid postcodes.
#[must_use]
pub fn normalize_postcode(postcode: &str) -> String {
    let compact: String = postcode
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    if compact.len() > 3 {
        let (outward, inward) = compact.split_at(compact.len() - 3);
        format!("{outward} {inward}")
    } else {
        compact
    }
}

/// Geocoding result for a resolved postcode
#[derive(Debug, Clone)]
pub struct GeocodedPostcode {
    pub postcode: String,
    pub coordinates: Coordinates,
    pub district: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PostcodeApiResponse {
    status: u16,
    result: Option<PostcodeApiResult>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PostcodeApiResult {
    latitude: f64,
    longitude: f64,
    admin_district: Option<String>,
    country: Option<String>,
}

/// HTTP client for the postcode geocoding service
pub struct PostcodeClient {
    client: Client,
    base_url: String,
}

impl PostcodeClient {
    /// Create a new client from configuration
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent("CartPilot/0.1.0")
            .build()
            .map_err(|e| CartPilotError::lookup_failed(format!("HTTP client setup: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a postcode to coordinates.
    ///
    /// Validates the format before any network I/O. Network failures,
    /// timeouts, unknown postcodes, and malformed bodies all surface as
    /// [`CartPilotError::LookupFailed`]; nothing here panics.
    #[instrument(skip(self))]
    pub async fn resolve(&self, postcode: &str) -> Result<GeocodedPostcode> {
        if !is_valid_postcode(postcode) {
            return Err(CartPilotError::invalid_input(format!(
                "'{postcode}' is not a valid UK postcode"
            )));
        }

        let normalized = normalize_postcode(postcode);
        let url = format!(
            "{}/postcodes/{}",
            self.base_url,
            urlencoding::encode(&normalized)
        );
        debug!("Geocoding request URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                warn!("Geocoding request failed for {}: {}", normalized, e);
                CartPilotError::lookup_failed(format!("geocoding request failed: {e}"))
            })?;

        let status = response.status();
        let body: PostcodeApiResponse = response.json().await.map_err(|e| {
            warn!("Malformed geocoding response for {}: {}", normalized, e);
            CartPilotError::lookup_failed(format!("malformed geocoding response: {e}"))
        })?;

        if !status.is_success() || body.status != 200 {
            let reason = body
                .error
                .unwrap_or_else(|| format!("service returned status {status}"));
            return Err(CartPilotError::lookup_failed(format!(
                "postcode {normalized}: {reason}"
            )));
        }

        let result = body.result.ok_or_else(|| {
            CartPilotError::lookup_failed(format!("no result for postcode {normalized}"))
        })?;

        info!(
            "Resolved {} to ({:.4}, {:.4})",
            normalized, result.latitude, result.longitude
        );

        Ok(GeocodedPostcode {
            postcode: normalized,
            coordinates: Coordinates::new(result.latitude, result.longitude),
            district: result.admin_district,
            country: result.country,
        })
    }
}
