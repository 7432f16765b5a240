//! Travel-time matrix providers
//!
//! Mapbox Matrix API for production, haversine estimation for tests.

mod mapbox;

pub use mapbox::{MapboxConfig, MapboxMatrixClient};

use async_trait::async_trait;
use thiserror::Error;

use crate::types::Coordinates;

/// Square matrix of pairwise travel times in seconds
///
/// `durations[i][j]` is the time to travel directly from location i to
/// location j; the diagonal is zero. The matrix is not required to be
/// symmetric and is read-only for the duration of one solve.
#[derive(Debug, Clone)]
pub struct TravelTimeMatrix {
    /// Travel time in seconds [i][j] from location i to location j
    pub durations: Vec<Vec<u32>>,
    /// Number of locations
    pub size: usize,
}

impl TravelTimeMatrix {
    /// Create an empty matrix
    pub fn empty() -> Self {
        Self {
            durations: vec![],
            size: 0,
        }
    }

    /// Build a matrix from explicit rows, rejecting non-square input
    pub fn from_rows(durations: Vec<Vec<u32>>) -> Option<Self> {
        let size = durations.len();
        if durations.iter().any(|row| row.len() != size) {
            return None;
        }
        Some(Self { durations, size })
    }

    /// Travel time from location `from` to location `to` in seconds
    pub fn duration(&self, from: usize, to: usize) -> u32 {
        self.durations[from][to]
    }
}

/// Failure of the external travel-time matrix source
///
/// Always distinct from route infeasibility: any of these aborts the solve
/// before search work begins and is safe to retry.
#[derive(Debug, Error)]
pub enum MatrixProviderError {
    /// Transport-level failure, including request timeout
    #[error("matrix request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Provider answered with a non-success HTTP status
    #[error("matrix provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Provider answered 200 but rejected the request in its payload
    #[error("matrix provider rejected the request ({code}): {message}")]
    Rejected { code: String, message: String },

    /// Payload did not contain a usable duration matrix
    #[error("malformed matrix response: {0}")]
    Malformed(String),

    /// Payload carried a duration matrix of the wrong shape
    #[error("matrix dimension mismatch: expected {expected}x{expected}, got {got}")]
    Dimension { expected: usize, got: usize },
}

/// Travel-time matrix source abstraction (Mapbox, mock, etc.)
///
/// Locations are ordered depot-first; the returned matrix must match their
/// count and carry zero on the diagonal.
#[async_trait]
pub trait MatrixProvider: Send + Sync {
    /// Fetch the pairwise travel-time matrix for the given locations
    async fn travel_time_matrix(
        &self,
        locations: &[Coordinates],
    ) -> Result<TravelTimeMatrix, MatrixProviderError>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Haversine-based matrix provider for tests and offline use
///
/// Estimates road travel time as straight-line distance times a road
/// coefficient, driven at a constant average speed.
pub struct HaversineMatrixProvider {
    /// Coefficient for converting straight-line to road distance (default: 1.3)
    road_coefficient: f64,
    /// Average speed in km/h for time estimation (default: 40)
    average_speed_kmh: f64,
}

impl Default for HaversineMatrixProvider {
    fn default() -> Self {
        Self {
            road_coefficient: 1.3,
            average_speed_kmh: 40.0,
        }
    }
}

impl HaversineMatrixProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(road_coefficient: f64, average_speed_kmh: f64) -> Self {
        Self {
            road_coefficient,
            average_speed_kmh,
        }
    }
}

#[async_trait]
impl MatrixProvider for HaversineMatrixProvider {
    async fn travel_time_matrix(
        &self,
        locations: &[Coordinates],
    ) -> Result<TravelTimeMatrix, MatrixProviderError> {
        let n = locations.len();
        if n == 0 {
            return Ok(TravelTimeMatrix::empty());
        }

        let mut durations = vec![vec![0u32; n]; n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    let straight_line_km = haversine_km(&locations[i], &locations[j]);
                    let travel_time_s = (straight_line_km * self.road_coefficient)
                        / self.average_speed_kmh
                        * 3600.0;
                    durations[i][j] = travel_time_s as u32;
                }
            }
        }

        Ok(TravelTimeMatrix { durations, size: n })
    }

    fn name(&self) -> &str {
        "HaversineMock"
    }
}

/// Great-circle distance between two coordinates in kilometers
fn haversine_km(a: &Coordinates, b: &Coordinates) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn puno() -> Coordinates {
        Coordinates {
            lat: -15.8402,
            lng: -70.0219,
        }
    }

    fn juliaca() -> Coordinates {
        Coordinates {
            lat: -15.4997,
            lng: -70.1333,
        }
    }

    fn arequipa() -> Coordinates {
        Coordinates {
            lat: -16.4090,
            lng: -71.5375,
        }
    }

    #[test]
    fn test_matrix_from_rows_square() {
        let m = TravelTimeMatrix::from_rows(vec![vec![0, 5], vec![7, 0]]).expect("square");
        assert_eq!(m.size, 2);
        assert_eq!(m.duration(0, 1), 5);
        assert_eq!(m.duration(1, 0), 7);
    }

    #[test]
    fn test_matrix_from_rows_ragged_rejected() {
        assert!(TravelTimeMatrix::from_rows(vec![vec![0, 5], vec![7]]).is_none());
    }

    #[test]
    fn test_haversine_puno_juliaca() {
        // Puno to Juliaca is roughly 40 km straight line
        let d = haversine_km(&puno(), &juliaca());
        assert!(d > 30.0 && d < 50.0, "expected ~40 km, got {} km", d);
    }

    #[tokio::test]
    async fn test_haversine_provider_empty() {
        let provider = HaversineMatrixProvider::new();
        let matrix = provider.travel_time_matrix(&[]).await.unwrap();
        assert_eq!(matrix.size, 0);
    }

    #[tokio::test]
    async fn test_haversine_provider_diagonal_zero() {
        let provider = HaversineMatrixProvider::new();
        let matrix = provider
            .travel_time_matrix(&[puno(), juliaca(), arequipa()])
            .await
            .unwrap();

        assert_eq!(matrix.size, 3);
        for i in 0..3 {
            assert_eq!(matrix.duration(i, i), 0);
            for j in 0..3 {
                if i != j {
                    assert!(matrix.duration(i, j) > 0);
                }
            }
        }
    }

    #[tokio::test]
    async fn test_haversine_provider_travel_time_reasonable() {
        let provider = HaversineMatrixProvider::new();
        let matrix = provider
            .travel_time_matrix(&[puno(), juliaca()])
            .await
            .unwrap();

        // ~40 km straight, ~52 km road, at 40 km/h that is a bit over an hour
        let hours = matrix.duration(0, 1) as f64 / 3600.0;
        assert!(hours > 0.8 && hours < 2.0, "expected ~1.3 h, got {} h", hours);

        // Symmetric by construction
        assert_eq!(matrix.duration(0, 1), matrix.duration(1, 0));
    }

    #[tokio::test]
    async fn test_haversine_provider_custom_params() {
        let slow = HaversineMatrixProvider::with_params(1.3, 20.0);
        let fast = HaversineMatrixProvider::new();

        let locations = [puno(), arequipa()];
        let slow_matrix = slow.travel_time_matrix(&locations).await.unwrap();
        let fast_matrix = fast.travel_time_matrix(&locations).await.unwrap();

        assert!(slow_matrix.duration(0, 1) > fast_matrix.duration(0, 1));
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(HaversineMatrixProvider::new().name(), "HaversineMock");
    }
}
