//! Itinerary extraction
//!
//! Walks a committed order with its concrete arrival times and renders the
//! caller-facing timetable: clock strings per visit, travel durations per
//! leg, and the total tour duration.

use crate::services::timefmt::{seconds_to_clock_str, seconds_to_duration_str, seconds_to_naive_time};
use crate::types::{Itinerary, ItineraryStop, Stop};

use super::model::RoutingModel;

/// Convert a scheduled order into an itinerary.
///
/// `arrivals[k]` is the concrete arrival time (seconds since midnight) at
/// `order[k]`. The depot is emitted as the first visit. Waiting at a closed
/// window is absorbed into the leg's travel time rather than reported
/// separately.
pub fn extract(
    stops: &[Stop],
    model: &RoutingModel,
    order: &[usize],
    arrivals: &[i64],
) -> Itinerary {
    let mut visits = Vec::with_capacity(order.len());
    // No travel before the tour starts: the depot leg is always zero
    let mut last_departure = arrivals[0];

    for (k, &node) in order.iter().enumerate() {
        let stop = &stops[node];
        let arrival = arrivals[k];
        let departure = arrival + model.service_time(node);
        let travel = (arrival - last_departure).max(0);
        last_departure = departure;

        visits.push(ItineraryStop {
            stop_id: stop.id.clone(),
            name: stop.name.clone(),
            order: k as u32,
            arrival: seconds_to_naive_time(arrival),
            departure: seconds_to_naive_time(departure),
            arrival_time_str: seconds_to_clock_str(arrival),
            departure_time_str: seconds_to_clock_str(departure),
            travel_time_str: seconds_to_duration_str(travel),
        });
    }

    // Open tour: total runs from the depot's start to the last departure
    let total_duration_seconds = (last_departure - arrivals[0]).max(0) as u64;

    Itinerary {
        stops: visits,
        total_duration_seconds,
        total_duration_str: seconds_to_duration_str(total_duration_seconds as i64),
    }
}
