//! Nearest-neighbour tour construction.

use optiroute_core::TripMode;

use crate::cost::Costs;

/// Build an initial order by always moving to the closest unvisited point.
///
/// Candidates are scanned in ascending index order and only a strictly
/// cheaper leg replaces the current best, so ties go to the lowest index.
/// Round trips close back at the depot; A-to-Z paths hold the last point
/// back and finish there.
pub(crate) fn nearest_neighbour(costs: &Costs<'_>, mode: TripMode) -> Vec<usize> {
    let n = costs.len();
    if n == 0 {
        return Vec::new();
    }
    let (mut remaining, end): (Vec<usize>, Option<usize>) = match mode {
        TripMode::RoundTrip => ((1..n).collect(), Some(0)),
        TripMode::AToZ if n == 1 => (Vec::new(), None),
        TripMode::AToZ => ((1..n - 1).collect(), Some(n - 1)),
    };

    let mut order = Vec::with_capacity(mode.stop_count(n));
    order.push(0);
    let mut current = 0;
    while let Some(position) = closest(costs, current, &remaining) {
        current = remaining.remove(position);
        order.push(current);
    }
    order.extend(end);
    order
}

fn closest(costs: &Costs<'_>, from: usize, candidates: &[usize]) -> Option<usize> {
    let mut best: Option<(usize, u128)> = None;
    for (position, &candidate) in candidates.iter().enumerate() {
        let leg = costs.leg(from, candidate);
        if best.is_none_or(|(_, best_leg)| leg < best_leg) {
            best = Some((position, leg));
        }
    }
    best.map(|(position, _)| position)
}
