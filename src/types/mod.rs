//! Type definitions

pub mod itinerary;
pub mod stop;

pub use itinerary::*;
pub use stop::*;
