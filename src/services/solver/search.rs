//! Search engine: cheapest feasible insertion, then bounded local search
//!
//! Construction inserts one stop at a time at the cheapest position whose
//! resulting order the propagator accepts; if at some step no pending stop
//! fits anywhere, the problem is infeasible. The optional improvement phase
//! tries adjacent swaps and single-stop relocations, accepting only moves
//! that strictly reduce arc cost and stay feasible.

use tracing::debug;

use crate::error::SolveError;

use super::model::{RoutingModel, TimeBounds};
use super::propagate;

/// Build a first feasible visiting order by cheapest feasible insertion.
///
/// Ties on marginal cost are broken by earliest window end (most urgent
/// first), then by node index, so the result is deterministic.
pub fn construct(model: &RoutingModel) -> Result<Vec<usize>, SolveError> {
    let n = model.size();
    let mut order = vec![0usize];
    let mut pending: Vec<usize> = (1..n).collect();

    while !pending.is_empty() {
        // (marginal cost, window end, node), lexicographic minimum wins
        let mut best: Option<(i64, i64, usize, usize)> = None;

        for &node in &pending {
            // Positions scanned back to front so that on a cost tie the new
            // stop lands after the already-committed ones
            for pos in (1..=order.len()).rev() {
                let marginal = insertion_cost(model, &order, node, pos);

                let candidate_key = (marginal, model.window(node).latest, node);
                if let Some((c, w, u, _)) = best {
                    if candidate_key >= (c, w, u) {
                        continue;
                    }
                }

                let mut candidate = order.clone();
                candidate.insert(pos, node);
                if propagate::tighten(model, &candidate).is_some() {
                    best = Some((marginal, model.window(node).latest, node, pos));
                }
            }
        }

        match best {
            Some((_, _, node, pos)) => {
                order.insert(pos, node);
                pending.retain(|&u| u != node);
            }
            None => {
                return Err(SolveError::no_feasible_route(format!(
                    "{} of {} stops cannot be scheduled inside their time windows",
                    pending.len(),
                    n - 1
                )));
            }
        }
    }

    Ok(order)
}

/// Marginal arc cost of inserting `node` at `pos` in the open tour
fn insertion_cost(model: &RoutingModel, order: &[usize], node: usize, pos: usize) -> i64 {
    let prev = order[pos - 1];
    if pos == order.len() {
        // Appending to an open tour breaks no edge
        model.arc_cost(prev, node)
    } else {
        let next = order[pos];
        model.arc_cost(prev, node) + model.arc_cost(node, next) - model.arc_cost(prev, next)
    }
}

/// Total arc cost of an open tour
pub fn total_cost(model: &RoutingModel, order: &[usize]) -> i64 {
    order
        .windows(2)
        .map(|leg| model.arc_cost(leg[0], leg[1]))
        .sum()
}

/// Improve a feasible order with adjacent swaps and relocations.
///
/// Each candidate move evaluated counts against `move_budget`; the phase
/// stops after a full sweep without improvement or when the budget runs out.
/// The returned order is always feasible and never costs more than the input.
pub fn improve(model: &RoutingModel, mut order: Vec<usize>, move_budget: usize) -> Vec<usize> {
    let n = order.len();
    if n < 3 || move_budget == 0 {
        return order;
    }

    let mut budget = move_budget;
    let mut current_cost = total_cost(model, &order);
    let mut improved = true;

    while improved && budget > 0 {
        improved = false;

        // Adjacent-pair swaps (depot at position 0 stays fixed)
        for i in 1..n - 1 {
            if budget == 0 {
                break;
            }
            budget -= 1;

            let mut candidate = order.clone();
            candidate.swap(i, i + 1);
            let cost = total_cost(model, &candidate);
            if cost < current_cost && propagate::tighten(model, &candidate).is_some() {
                order = candidate;
                current_cost = cost;
                improved = true;
            }
        }

        // Single-stop relocations
        for from in 1..n {
            for to in 1..n {
                if from == to || budget == 0 {
                    continue;
                }
                budget -= 1;

                let mut candidate = order.clone();
                let node = candidate.remove(from);
                candidate.insert(to, node);
                let cost = total_cost(model, &candidate);
                if cost < current_cost && propagate::tighten(model, &candidate).is_some() {
                    order = candidate;
                    current_cost = cost;
                    improved = true;
                }
            }
        }
    }

    if budget == 0 {
        debug!("Improvement phase stopped on exhausted move budget");
    }

    order
}

/// Pick concrete arrival times from tightened bounds: the earliest feasible
/// arrival at every node, never waiting longer than necessary.
pub fn schedule(model: &RoutingModel, order: &[usize], bounds: &[TimeBounds]) -> Vec<i64> {
    let mut arrivals = Vec::with_capacity(order.len());
    for k in 0..order.len() {
        let arrival = if k == 0 {
            bounds[0].earliest
        } else {
            let reachable = arrivals[k - 1] + model.transit(order[k - 1], order[k]);
            bounds[k].earliest.max(reachable)
        };
        arrivals.push(arrival);
    }
    arrivals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::routing::TravelTimeMatrix;
    use crate::services::solver::SolverConfig;
    use crate::types::{Coordinates, Stop, TimeWindow};
    use chrono::NaiveTime;

    fn coords() -> Coordinates {
        Coordinates {
            lat: -15.84,
            lng: -70.02,
        }
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn stop(id: &str, start: NaiveTime, end: NaiveTime, service_minutes: u32) -> Stop {
        Stop::new(id, id, coords(), TimeWindow::new(start, end), service_minutes)
    }

    fn model(stops: &[Stop], rows: Vec<Vec<u32>>) -> RoutingModel {
        let matrix = TravelTimeMatrix::from_rows(rows).expect("square");
        RoutingModel::build(stops, &matrix, &SolverConfig::default()).expect("valid model")
    }

    #[test]
    fn test_construct_depot_only() {
        let stops = vec![Stop::depot(coords())];
        let m = model(&stops, vec![vec![0]]);
        assert_eq!(construct(&m).unwrap(), vec![0]);
    }

    #[test]
    fn test_construct_prefers_cheapest_arc() {
        // Wide windows: pure cost decides. Stop b is closer to the depot.
        let stops = vec![
            Stop::depot(coords()),
            stop("a", t(0, 0), t(23, 0), 0),
            stop("b", t(0, 0), t(23, 0), 0),
        ];
        let m = model(
            &stops,
            vec![
                vec![0, 2000, 1000],
                vec![2000, 0, 500],
                vec![1000, 500, 0],
            ],
        );

        let order = construct(&m).unwrap();
        assert_eq!(order, vec![0, 2, 1]);
    }

    #[test]
    fn test_construct_tie_break_by_window_end() {
        // Equidistant stops, identical costs everywhere: the stop whose
        // window closes first is inserted first and ends up visited first.
        let stops = vec![
            Stop::depot(coords()),
            stop("late", t(8, 0), t(18, 0), 0),
            stop("urgent", t(8, 0), t(10, 0), 0),
        ];
        let m = model(
            &stops,
            vec![
                vec![0, 600, 600],
                vec![600, 0, 600],
                vec![600, 600, 0],
            ],
        );

        let order = construct(&m).unwrap();
        assert_eq!(order, vec![0, 2, 1]);
    }

    #[test]
    fn test_construct_respects_windows_over_cost() {
        // Stop a is nearer, but b's window forces it to be visited first
        let stops = vec![
            Stop::depot(coords()),
            stop("a", t(9, 0), t(12, 0), 30),
            stop("b", t(9, 30), t(10, 0), 30),
        ];
        let m = model(
            &stops,
            vec![
                vec![0, 600, 1200],
                vec![600, 0, 900],
                vec![1200, 900, 0],
            ],
        );

        let order = construct(&m).unwrap();
        // Both orders are feasible here; insertion puts a first (cheaper),
        // then appends b, and the propagator accepts it
        assert_eq!(order.len(), 3);
        assert_eq!(order[0], 0);
        assert!(propagate::tighten(&m, &order).is_some());
    }

    #[test]
    fn test_construct_window_forces_noncheap_order() {
        // Stop a is cheaper to reach first, but the two-hour leg a -> b
        // overshoots b's window; only b-then-a can be scheduled
        let stops = vec![
            Stop::depot(coords()),
            stop("a", t(9, 0), t(12, 0), 30),
            stop("b", t(9, 30), t(10, 0), 30),
        ];
        let m = model(
            &stops,
            vec![
                vec![0, 600, 1200],
                vec![600, 0, 7200],
                vec![1200, 900, 0],
            ],
        );

        assert_eq!(construct(&m).unwrap(), vec![0, 2, 1]);
    }

    #[test]
    fn test_construct_infeasible_pair() {
        let stops = vec![
            Stop::depot(coords()),
            stop("a", t(8, 0), t(8, 5), 0),
            stop("b", t(8, 0), t(8, 5), 0),
        ];
        let m = model(
            &stops,
            vec![
                vec![0, 60, 60],
                vec![60, 0, 3600],
                vec![60, 3600, 0],
            ],
        );

        let err = construct(&m).unwrap_err();
        assert!(matches!(err, SolveError::NoFeasibleRoute { .. }));
    }

    #[test]
    fn test_improve_never_worsens() {
        let stops = vec![
            Stop::depot(coords()),
            stop("a", t(0, 0), t(23, 0), 10),
            stop("b", t(0, 0), t(23, 0), 10),
            stop("c", t(0, 0), t(23, 0), 10),
        ];
        let m = model(
            &stops,
            vec![
                vec![0, 300, 1500, 1400],
                vec![300, 0, 1600, 200],
                vec![1500, 1600, 0, 250],
                vec![1400, 200, 250, 0],
            ],
        );

        let initial = construct(&m).unwrap();
        let initial_cost = total_cost(&m, &initial);
        let improved = improve(&m, initial, 1000);

        assert!(total_cost(&m, &improved) <= initial_cost);
        assert!(propagate::tighten(&m, &improved).is_some());
        assert_eq!(improved[0], 0);
        assert_eq!(improved.len(), 4);
    }

    #[test]
    fn test_improve_swap_fixes_bad_order() {
        let stops = vec![
            Stop::depot(coords()),
            stop("a", t(0, 0), t(23, 0), 0),
            stop("b", t(0, 0), t(23, 0), 0),
        ];
        // a->b is terrible; b->a is fine
        let m = model(
            &stops,
            vec![
                vec![0, 100, 110],
                vec![100, 0, 5000],
                vec![110, 120, 0],
            ],
        );

        let improved = improve(&m, vec![0, 1, 2], 1000);
        assert_eq!(improved, vec![0, 2, 1]);
        assert_eq!(total_cost(&m, &improved), 110 + 120);
    }

    #[test]
    fn test_improve_zero_budget_is_noop() {
        let stops = vec![
            Stop::depot(coords()),
            stop("a", t(0, 0), t(23, 0), 0),
            stop("b", t(0, 0), t(23, 0), 0),
        ];
        let m = model(
            &stops,
            vec![
                vec![0, 100, 110],
                vec![100, 0, 5000],
                vec![110, 120, 0],
            ],
        );

        let initial = construct(&m).unwrap();
        assert_eq!(improve(&m, initial.clone(), 0), initial);
    }

    #[test]
    fn test_schedule_greedy_earliest() {
        let stops = vec![
            Stop::depot(coords()),
            stop("a", t(9, 0), t(12, 0), 30),
        ];
        let m = model(&stops, vec![vec![0, 600], vec![600, 0]]);

        let order = vec![0, 1];
        let bounds = propagate::tighten(&m, &order).expect("feasible");
        let arrivals = schedule(&m, &order, &bounds);

        // Depot leaves as late as needed to cap waiting at the slack bound
        assert_eq!(arrivals[0], 9 * 3600 - 600 - 900);
        assert_eq!(arrivals[1], 9 * 3600);
    }

    #[test]
    fn test_schedule_no_unnecessary_waiting() {
        let stops = vec![
            Stop::depot(coords()),
            stop("a", t(0, 0), t(23, 0), 10),
            stop("b", t(0, 0), t(23, 0), 10),
        ];
        let m = model(
            &stops,
            vec![
                vec![0, 300, 800],
                vec![300, 0, 400],
                vec![800, 400, 0],
            ],
        );

        let order = vec![0, 1, 2];
        let bounds = propagate::tighten(&m, &order).expect("feasible");
        let arrivals = schedule(&m, &order, &bounds);

        assert_eq!(arrivals[0], 0);
        assert_eq!(arrivals[1], 300);
        assert_eq!(arrivals[2], 300 + 600 + 400);
    }
}
