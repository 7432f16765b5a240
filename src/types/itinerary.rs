//! Solved itinerary types

use chrono::NaiveTime;
use serde::Serialize;

/// One visit in the solved itinerary
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryStop {
    /// Stop ID (matches `Stop::id`)
    pub stop_id: String,
    /// Stop display name
    pub name: String,
    /// Position in the route (0 = depot)
    pub order: u32,
    /// Arrival time at this stop
    pub arrival: NaiveTime,
    /// Departure time (arrival + service duration)
    pub departure: NaiveTime,
    /// Arrival formatted as a 12-hour clock string, e.g. "09:30 AM"
    pub arrival_time_str: String,
    /// Departure formatted as a 12-hour clock string
    pub departure_time_str: String,
    /// Time spent getting to this stop, e.g. "15 min". Waiting at a closed
    /// window is absorbed into this value rather than reported separately.
    pub travel_time_str: String,
}

/// A complete solved route with timetable
#[derive(Debug, Clone, Serialize)]
pub struct Itinerary {
    /// Visits in order, depot first
    pub stops: Vec<ItineraryStop>,
    /// Total tour duration in seconds (last departure minus depot start)
    pub total_duration_seconds: u64,
    /// Total tour duration formatted, e.g. "2 h 05 min"
    pub total_duration_str: String,
}
