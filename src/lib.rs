//! Puno Solver - Time-window route optimization core
//!
//! Computes an optimal visiting order and timetable for a single vehicle
//! that departs from a start location and must visit a set of stops, each
//! with its own time-of-day window and service duration. Travel times come
//! from a pluggable matrix provider (Mapbox Matrix API in production,
//! haversine estimation for tests and offline use).
//!
//! The solver is a pure, stateless function of its inputs: stop CRUD, route
//! persistence and transport belong to the embedding application.

pub mod config;
pub mod error;
pub mod services;
pub mod types;

pub use config::Config;
pub use error::SolveError;
pub use services::routing::{
    HaversineMatrixProvider, MapboxConfig, MapboxMatrixClient, MatrixProvider,
    MatrixProviderError, TravelTimeMatrix,
};
pub use services::solver::{RouteSolver, SolverConfig};
pub use types::{Coordinates, Itinerary, ItineraryStop, Stop, TimeWindow};
