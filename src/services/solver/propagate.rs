//! Time-dimension propagation
//!
//! Given a visiting order, narrows every node's feasible arrival interval by
//! alternating forward and backward passes until a fixpoint. A collapsed
//! interval at any node proves the order cannot be scheduled.
//!
//! The forward pass pushes earliest/latest arrivals along the arcs; the
//! backward pass lets a narrow window on a later node restrict how late (and
//! through the slack cap, how early) earlier nodes may be visited. Waiting
//! before a stop is bounded by the model's per-leg slack.

use super::model::{RoutingModel, TimeBounds};

/// Tighten per-node arrival intervals for the given order.
///
/// `order` is the full visiting sequence, depot first. Returns `None` when
/// no schedule can satisfy every window along the order.
pub fn tighten(model: &RoutingModel, order: &[usize]) -> Option<Vec<TimeBounds>> {
    let n = order.len();
    if n == 0 {
        return Some(vec![]);
    }

    let slack = model.max_leg_slack();

    // Start from each node's own window intersected with the horizon
    let mut bounds: Vec<TimeBounds> = order
        .iter()
        .map(|&node| {
            let w = model.window(node);
            TimeBounds::new(w.earliest.max(0), w.latest.min(model.horizon()))
        })
        .collect();

    for b in &bounds {
        if b.is_empty() {
            return None;
        }
    }

    // Alternate passes until nothing changes. Bounds only ever shrink, so
    // the loop terminates.
    let mut changed = true;
    while changed {
        changed = false;

        // Forward: arrival_k is reachable from arrival_{k-1} plus service and
        // travel, delayed at most by the slack cap
        for k in 1..n {
            let transit = model.transit(order[k - 1], order[k]);
            let earliest = bounds[k].earliest.max(bounds[k - 1].earliest + transit);
            let latest = bounds[k].latest.min(bounds[k - 1].latest + transit + slack);
            if earliest != bounds[k].earliest || latest != bounds[k].latest {
                bounds[k] = TimeBounds::new(earliest, latest);
                changed = true;
            }
            if bounds[k].is_empty() {
                return None;
            }
        }

        // Backward: arrival_k must leave enough room to reach the successor
        // inside its interval, with waiting there capped by the slack
        for k in (0..n - 1).rev() {
            let transit = model.transit(order[k], order[k + 1]);
            let latest = bounds[k].latest.min(bounds[k + 1].latest - transit);
            let earliest = bounds[k]
                .earliest
                .max(bounds[k + 1].earliest - transit - slack);
            if earliest != bounds[k].earliest || latest != bounds[k].latest {
                bounds[k] = TimeBounds::new(earliest, latest);
                changed = true;
            }
            if bounds[k].is_empty() {
                return None;
            }
        }
    }

    Some(bounds)
}
