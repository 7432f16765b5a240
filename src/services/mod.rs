//! Service layer

pub mod routing;
pub mod solver;
pub mod timefmt;
