//! Mapbox Matrix API client
//!
//! Mapbox API documentation:
//! https://docs.mapbox.com/api/navigation/matrix/

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{MatrixProvider, MatrixProviderError, TravelTimeMatrix};
use crate::types::Coordinates;

/// Mapbox client configuration
#[derive(Debug, Clone)]
pub struct MapboxConfig {
    /// Access token for the Matrix API
    pub access_token: String,
    /// Base URL including the routing profile
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl MapboxConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Default::default()
        }
    }
}

impl Default for MapboxConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            base_url: "https://api.mapbox.com/directions-matrix/v1/mapbox/driving-traffic"
                .to_string(),
            timeout_seconds: 20,
        }
    }
}

/// Mapbox Matrix API client
pub struct MapboxMatrixClient {
    client: Client,
    config: MapboxConfig,
}

impl MapboxMatrixClient {
    pub fn new(config: MapboxConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Build the semicolon-separated coordinate path segment.
    /// Mapbox expects longitude first.
    fn coordinates_path(locations: &[Coordinates]) -> String {
        locations
            .iter()
            .map(|c| format!("{},{}", c.lng, c.lat))
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Validate the raw duration rows and convert them into a matrix
    fn matrix_from_rows(
        rows: Vec<Vec<Option<f64>>>,
        n: usize,
    ) -> Result<TravelTimeMatrix, MatrixProviderError> {
        if rows.len() != n {
            return Err(MatrixProviderError::Dimension {
                expected: n,
                got: rows.len(),
            });
        }
        if let Some(row) = rows.iter().find(|row| row.len() != n) {
            return Err(MatrixProviderError::Dimension {
                expected: n,
                got: row.len(),
            });
        }

        let mut durations = vec![vec![0u32; n]; n];
        for (i, row) in rows.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                // Unroutable pairs come back as null; make them prohibitively
                // expensive instead of failing the whole matrix
                durations[i][j] = match cell {
                    Some(seconds) => seconds.max(0.0) as u32,
                    None => {
                        warn!("No duration for route {} -> {}", i, j);
                        u32::MAX / 2
                    }
                };
            }
        }

        Ok(TravelTimeMatrix { durations, size: n })
    }
}

#[async_trait]
impl MatrixProvider for MapboxMatrixClient {
    async fn travel_time_matrix(
        &self,
        locations: &[Coordinates],
    ) -> Result<TravelTimeMatrix, MatrixProviderError> {
        let n = locations.len();

        if n == 0 {
            return Ok(TravelTimeMatrix::empty());
        }

        if n == 1 {
            return Ok(TravelTimeMatrix {
                durations: vec![vec![0]],
                size: 1,
            });
        }

        let url = format!(
            "{}/{}",
            self.config.base_url,
            Self::coordinates_path(locations)
        );

        debug!("Requesting travel-time matrix from Mapbox for {} locations", n);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("annotations", "duration"),
                ("access_token", self.config.access_token.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(MatrixProviderError::Status { status, body });
        }

        let matrix_response: MatrixResponse = response.json().await?;

        if matrix_response.code != "Ok" {
            return Err(MatrixProviderError::Rejected {
                code: matrix_response.code,
                message: matrix_response.message.unwrap_or_default(),
            });
        }

        let rows = matrix_response
            .durations
            .ok_or_else(|| MatrixProviderError::Malformed("missing durations".to_string()))?;

        let matrix = Self::matrix_from_rows(rows, n)?;

        debug!("Received travel-time matrix from Mapbox: {}x{}", n, n);

        Ok(matrix)
    }

    fn name(&self) -> &str {
        "Mapbox"
    }
}

// Mapbox API types

#[derive(Debug, Deserialize)]
struct MatrixResponse {
    code: String,
    durations: Option<Vec<Vec<Option<f64>>>>,
    message: Option<String>,
}
