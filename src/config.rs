//! Configuration management

use anyhow::{Context, Result};

use crate::services::routing::MapboxConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Mapbox access token for the Matrix API
    pub mapbox_access_token: String,

    /// Base URL of the Mapbox Matrix endpoint (profile included)
    pub mapbox_matrix_url: String,

    /// Timeout for matrix requests in seconds
    pub matrix_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let mapbox_access_token = std::env::var("MAPBOX_ACCESS_TOKEN")
            .context("MAPBOX_ACCESS_TOKEN must be set")?;

        let mapbox_matrix_url = std::env::var("MAPBOX_MATRIX_URL").unwrap_or_else(|_| {
            "https://api.mapbox.com/directions-matrix/v1/mapbox/driving-traffic".to_string()
        });

        let matrix_timeout_seconds = match std::env::var("MATRIX_TIMEOUT_SECONDS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("MATRIX_TIMEOUT_SECONDS must be a positive integer")?,
            Err(_) => 20,
        };

        if mapbox_access_token.starts_with("pk.test") {
            tracing::warn!("MAPBOX_ACCESS_TOKEN looks like a test token, matrix requests will fail against production");
        }

        Ok(Self {
            mapbox_access_token,
            mapbox_matrix_url,
            matrix_timeout_seconds,
        })
    }

    /// Build the Mapbox client configuration from this config
    pub fn mapbox_config(&self) -> MapboxConfig {
        MapboxConfig {
            access_token: self.mapbox_access_token.clone(),
            base_url: self.mapbox_matrix_url.clone(),
            timeout_seconds: self.matrix_timeout_seconds,
        }
    }
}
