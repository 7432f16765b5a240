//! Time-window route solver
//!
//! Owns the whole pipeline: model building, time-window propagation,
//! construction and improvement search, and itinerary extraction. One solve
//! is a pure function of its inputs; nothing is shared across calls.

mod itinerary;
mod model;
mod propagate;
mod search;

pub use model::{RoutingModel, TimeBounds};

use std::time::Instant;

use tracing::{debug, info};

use crate::error::SolveError;
use crate::services::routing::{MatrixProvider, TravelTimeMatrix};
use crate::types::{Itinerary, Stop};

/// Configuration for the route solver
///
/// The slack and horizon defaults reproduce the production schedule policy:
/// at most 15 minutes of waiting before any stop, everything within one
/// calendar day.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum waiting time before any single stop, in seconds
    pub max_leg_slack_seconds: u32,
    /// Latest schedulable cumulative time, in seconds since midnight
    pub horizon_seconds: u32,
    /// Candidate-move budget for the improvement phase (0 disables it)
    pub improvement_move_budget: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_leg_slack_seconds: 900,
            horizon_seconds: 86_400,
            improvement_move_budget: 2_000,
        }
    }
}

impl SolverConfig {
    /// Construction phase only: return the first feasible cheapest-arc order
    pub fn construction_only() -> Self {
        Self {
            improvement_move_budget: 0,
            ..Default::default()
        }
    }

    /// Larger move budget for background optimization
    pub fn quality() -> Self {
        Self {
            improvement_move_budget: 20_000,
            ..Default::default()
        }
    }
}

/// Single-vehicle time-window route solver
pub struct RouteSolver {
    config: SolverConfig,
}

impl RouteSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Fetch the travel-time matrix for the stops, then solve.
    ///
    /// The stop at index 0 is the depot. A provider failure aborts the solve
    /// before any search work begins and is surfaced as its own error kind.
    pub async fn solve(
        &self,
        stops: &[Stop],
        provider: &dyn MatrixProvider,
    ) -> Result<Itinerary, SolveError> {
        if stops.is_empty() {
            return Err(SolveError::invalid_model("stop list is empty"));
        }

        let locations: Vec<_> = stops.iter().map(|s| s.coordinates).collect();
        info!(
            "Requesting travel-time matrix from {} for {} stops",
            provider.name(),
            stops.len()
        );
        let matrix = provider.travel_time_matrix(&locations).await?;

        self.solve_with_matrix(stops, &matrix)
    }

    /// Solve against an already-available travel-time matrix.
    ///
    /// Pure and stateless: concurrent calls are fully independent.
    pub fn solve_with_matrix(
        &self,
        stops: &[Stop],
        matrix: &TravelTimeMatrix,
    ) -> Result<Itinerary, SolveError> {
        let started_at = Instant::now();
        info!("Solving route with {} stops", stops.len());

        let model = RoutingModel::build(stops, matrix, &self.config)?;

        let mut order = search::construct(&model)?;
        debug!("Construction produced order {:?}", order);

        if self.config.improvement_move_budget > 0 {
            order = search::improve(&model, order, self.config.improvement_move_budget);
            debug!("Improvement settled on order {:?}", order);
        }

        let bounds = propagate::tighten(&model, &order).ok_or_else(|| {
            SolveError::internal("committed order failed time propagation")
        })?;
        let arrivals = search::schedule(&model, &order, &bounds);

        let itinerary = itinerary::extract(stops, &model, &order, &arrivals);

        info!(
            "Route solved: {} stops, total {} in {} ms",
            itinerary.stops.len(),
            itinerary.total_duration_str,
            started_at.elapsed().as_millis()
        );

        Ok(itinerary)
    }
}

impl Default for RouteSolver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}
