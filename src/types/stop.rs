//! Stop, time window and coordinate types

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Geographic coordinates (WGS84)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Arrival time window for a stop
///
/// The vehicle must arrive no earlier than `start` and no later than `end`.
/// Arriving before `start` means waiting at the door; arriving after `end`
/// is a hard violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Window covering the whole day (used by the depot)
    pub fn full_day() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(0, 0, 0).expect("valid time"),
            end: NaiveTime::from_hms_opt(23, 59, 59).expect("valid time"),
        }
    }

    /// Window start as seconds since midnight
    pub fn start_seconds(&self) -> i64 {
        self.start.num_seconds_from_midnight() as i64
    }

    /// Window end as seconds since midnight
    pub fn end_seconds(&self) -> i64 {
        self.end.num_seconds_from_midnight() as i64
    }

    /// A window is valid when it does not end before it starts
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }
}

/// A stop to visit
///
/// Index 0 of the stop list passed to the solver is always the depot (the
/// vehicle's start location). Stops are immutable for the duration of one
/// solve; the solver never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stop {
    /// Opaque identifier, echoed back in the itinerary
    pub id: String,
    /// Display name
    pub name: String,
    /// Location (used only to request the travel-time matrix)
    pub coordinates: Coordinates,
    /// Allowed arrival window
    pub window: TimeWindow,
    /// Service duration at this stop in minutes
    pub service_minutes: u32,
}

impl Stop {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        coordinates: Coordinates,
        window: TimeWindow,
        service_minutes: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinates,
            window,
            service_minutes,
        }
    }

    /// Synthetic depot stop: full-day window, zero service time
    pub fn depot(coordinates: Coordinates) -> Self {
        Self {
            id: "depot".to_string(),
            name: "Depot".to_string(),
            coordinates,
            window: TimeWindow::full_day(),
            service_minutes: 0,
        }
    }

    /// Service duration in seconds
    pub fn service_seconds(&self) -> i64 {
        self.service_minutes as i64 * 60
    }
}
