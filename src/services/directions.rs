//! Driving directions with geodesic fallback
//!
//! The primary source is the Naver driving-directions API. Any failure on a
//! leg (timeout, non-2xx status, malformed body, missing route) degrades
//! that single leg to the haversine estimate instead of failing the whole
//! matrix; there is no retry per pair.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::services::geo;
use crate::types::Coordinates;

/// Distance/time estimate for a single directed leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegEstimate {
    /// Travel distance in meters.
    pub distance_m: u64,
    /// Travel time in whole minutes, at least 1.
    pub duration_min: u64,
    pub source: LegSource,
}

/// Where a leg estimate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegSource {
    /// Road-network result from the directions API.
    Directions,
    /// Geodesic fallback (walking-speed duration).
    Haversine,
}

/// Raw distance/duration for one driving leg as the API reports it.
#[derive(Debug, Clone, Copy)]
pub struct DrivingLeg {
    pub distance_m: u64,
    pub duration_ms: u64,
}

/// A road-network driving query for one directed leg.
#[async_trait]
pub trait DrivingDirections: Send + Sync {
    async fn leg(&self, from: &Coordinates, to: &Coordinates) -> Result<DrivingLeg>;

    /// Service name for logging
    fn name(&self) -> &str;
}

/// Naver directions client configuration
#[derive(Debug, Clone)]
pub struct NaverConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    /// Per-call request timeout in seconds
    pub timeout_seconds: u64,
}

/// Naver driving-directions client
pub struct NaverDirectionsClient {
    client: Client,
    config: NaverConfig,
}

impl NaverDirectionsClient {
    pub fn new(config: NaverConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Build the driving query URL. Naver expects "lng,lat" coordinate order.
    fn driving_url(&self, from: &Coordinates, to: &Coordinates) -> String {
        format!(
            "{}/map-direction/v1/driving?start={:.6},{:.6}&goal={:.6},{:.6}&option=trafast",
            self.config.base_url, from.lng, from.lat, to.lng, to.lat
        )
    }
}

#[async_trait]
impl DrivingDirections for NaverDirectionsClient {
    async fn leg(&self, from: &Coordinates, to: &Coordinates) -> Result<DrivingLeg> {
        let url = self.driving_url(from, to);

        let response = self
            .client
            .get(&url)
            .header("X-NCP-APIGW-API-KEY-ID", &self.config.client_id)
            .header("X-NCP-APIGW-API-KEY", &self.config.client_secret)
            .send()
            .await
            .context("Failed to send directions request")?;

        if !response.status().is_success() {
            anyhow::bail!("Directions API returned status {}", response.status());
        }

        let body: DrivingResponse = response
            .json()
            .await
            .context("Failed to parse directions response")?;

        let summary = body
            .route
            .and_then(|route| route.trafast.into_iter().next())
            .map(|trafast| trafast.summary)
            .context("Directions response has no trafast route")?;

        Ok(DrivingLeg {
            distance_m: summary.distance,
            duration_ms: summary.duration,
        })
    }

    fn name(&self) -> &str {
        "NaverDirections"
    }
}

// Naver API response types

#[derive(Debug, Deserialize)]
struct DrivingResponse {
    route: Option<DrivingRoutes>,
}

#[derive(Debug, Deserialize)]
struct DrivingRoutes {
    #[serde(default)]
    trafast: Vec<TrafastRoute>,
}

#[derive(Debug, Deserialize)]
struct TrafastRoute {
    summary: TrafastSummary,
}

#[derive(Debug, Deserialize)]
struct TrafastSummary {
    /// Distance in meters
    distance: u64,
    /// Duration in milliseconds
    duration: u64,
}

/// Per-leg distance/duration provider.
///
/// Uses the directions API when one is attached and falls back to the
/// geodesic estimate on any failure. `estimate` is total - it never
/// surfaces an error to the matrix builder.
pub struct LegProvider {
    directions: Option<Arc<dyn DrivingDirections>>,
}

impl LegProvider {
    /// Provider without an external API - every leg uses the fallback.
    pub fn fallback_only() -> Self {
        Self { directions: None }
    }

    pub fn new(directions: Arc<dyn DrivingDirections>) -> Self {
        Self {
            directions: Some(directions),
        }
    }

    /// Build from process configuration. The directions API is attached only
    /// when the enable flag and both credentials are present.
    pub fn from_config(config: &Config) -> Self {
        let Some((client_id, client_secret)) = config.directions_credentials() else {
            debug!("Directions API disabled, using haversine fallback for all legs");
            return Self::fallback_only();
        };

        let naver = NaverConfig {
            base_url: config.naver_base_url.clone(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            timeout_seconds: config.directions_timeout_seconds,
        };

        match NaverDirectionsClient::new(naver) {
            Ok(client) => {
                debug!("Directions API enabled at {}", config.naver_base_url);
                Self::new(Arc::new(client))
            }
            Err(e) => {
                warn!("Failed to build directions client: {e:#}. Using haversine fallback only.");
                Self::fallback_only()
            }
        }
    }

    /// Whether an external directions API is attached.
    pub fn has_directions(&self) -> bool {
        self.directions.is_some()
    }

    /// Estimate one directed leg. A primary failure degrades this leg only;
    /// minutes from the API are `max(1, duration_ms / 60000)`.
    pub async fn estimate(&self, from: &Coordinates, to: &Coordinates) -> LegEstimate {
        if let Some(api) = &self.directions {
            match api.leg(from, to).await {
                Ok(leg) => {
                    return LegEstimate {
                        distance_m: leg.distance_m,
                        duration_min: (leg.duration_ms / 60_000).max(1),
                        source: LegSource::Directions,
                    };
                }
                Err(e) => {
                    warn!("{} leg query failed ({e:#}), falling back to haversine", api.name());
                }
            }
        }

        let distance_m = geo::haversine_meters(from, to);
        LegEstimate {
            distance_m,
            duration_min: geo::fallback_minutes(distance_m),
            source: LegSource::Haversine,
        }
    }
}
