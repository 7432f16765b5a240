//! Routing model builder
//!
//! Validates the raw inputs and freezes them into the immutable model the
//! propagator and search engine work on: per-node window bounds in seconds
//! since midnight, per-node service times, and the arc cost function.

use crate::error::SolveError;
use crate::services::routing::TravelTimeMatrix;
use crate::types::Stop;

use super::SolverConfig;

/// Feasible arrival interval at a node, in seconds since midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBounds {
    pub earliest: i64,
    pub latest: i64,
}

impl TimeBounds {
    pub fn new(earliest: i64, latest: i64) -> Self {
        Self { earliest, latest }
    }

    /// An interval collapses when its lower bound exceeds its upper bound;
    /// that is the infeasibility signal.
    pub fn is_empty(&self) -> bool {
        self.earliest > self.latest
    }
}

/// Immutable solver model: nodes, windows, service times, travel times
///
/// Node 0 is always the depot. The vehicle never returns to it (open tour).
#[derive(Debug)]
pub struct RoutingModel {
    size: usize,
    windows: Vec<TimeBounds>,
    service: Vec<i64>,
    travel: Vec<Vec<i64>>,
    max_leg_slack: i64,
    horizon: i64,
}

impl RoutingModel {
    /// Validate inputs and build the model
    pub fn build(
        stops: &[Stop],
        matrix: &TravelTimeMatrix,
        config: &SolverConfig,
    ) -> Result<Self, SolveError> {
        let n = stops.len();
        if n == 0 {
            return Err(SolveError::invalid_model("stop list is empty"));
        }
        if matrix.size != n || matrix.durations.len() != n {
            return Err(SolveError::invalid_model(format!(
                "matrix is {}x{} but {} stops were given",
                matrix.size,
                matrix.durations.len(),
                n
            )));
        }
        for (i, row) in matrix.durations.iter().enumerate() {
            if row.len() != n {
                return Err(SolveError::invalid_model(format!(
                    "matrix row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
        }

        let horizon = config.horizon_seconds as i64;
        let mut windows = Vec::with_capacity(n);
        for stop in stops {
            if !stop.window.is_valid() {
                return Err(SolveError::invalid_model(format!(
                    "stop '{}' has a window that ends before it starts",
                    stop.id
                )));
            }
            // Clamp each window to the schedulable horizon
            windows.push(TimeBounds::new(
                stop.window.start_seconds().min(horizon),
                stop.window.end_seconds().min(horizon),
            ));
        }

        let service: Vec<i64> = stops.iter().map(|s| s.service_seconds()).collect();
        let travel: Vec<Vec<i64>> = matrix
            .durations
            .iter()
            .map(|row| row.iter().map(|&d| d as i64).collect())
            .collect();

        Ok(Self {
            size: n,
            windows,
            service,
            travel,
            max_leg_slack: config.max_leg_slack_seconds as i64,
            horizon,
        })
    }

    /// Number of nodes including the depot
    pub fn size(&self) -> usize {
        self.size
    }

    /// Arrival window at a node
    pub fn window(&self, node: usize) -> TimeBounds {
        self.windows[node]
    }

    /// Service time at a node in seconds
    pub fn service_time(&self, node: usize) -> i64 {
        self.service[node]
    }

    /// Travel time between two nodes in seconds
    pub fn travel_time(&self, from: usize, to: usize) -> i64 {
        self.travel[from][to]
    }

    /// Arc cost: travel time plus the service charged at the departure node
    pub fn arc_cost(&self, from: usize, to: usize) -> i64 {
        self.travel[from][to] + self.service[from]
    }

    /// Elapsed time on the arc `from -> to`: service at `from`, then travel
    pub fn transit(&self, from: usize, to: usize) -> i64 {
        self.arc_cost(from, to)
    }

    /// Maximum waiting allowed before any single stop, in seconds
    pub fn max_leg_slack(&self) -> i64 {
        self.max_leg_slack
    }

    /// Latest schedulable cumulative time, in seconds
    pub fn horizon(&self) -> i64 {
        self.horizon
    }
}
