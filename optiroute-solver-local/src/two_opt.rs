//! Best-improvement 2-opt.
//!
//! A move removes edges `(a, b)` and `(c, e)` and reverses the segment from
//! `b` to `c`. Travel times may be asymmetric, so the reversed segment is
//! re-costed in its new direction rather than assumed unchanged.

use optiroute_core::TripMode;

use crate::cost::Costs;

/// Outcome of an improvement run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Improvement {
    /// Number of moves applied.
    pub(crate) moves: usize,
    /// Whether the run stopped because no move improved the tour.
    pub(crate) converged: bool,
}

#[derive(Debug, Clone, Copy)]
struct Move {
    i: usize,
    j: usize,
    gain: u128,
}

/// Apply the best improving move per pass until none remains or
/// `max_passes` moves have been applied.
///
/// The first and last stops never move.
pub(crate) fn improve(
    costs: &Costs<'_>,
    order: &mut [usize],
    mode: TripMode,
    max_passes: usize,
) -> Improvement {
    for pass in 0..max_passes {
        let Some(best) = best_move(costs, order, mode) else {
            return Improvement {
                moves: pass,
                converged: true,
            };
        };
        if let Some(segment) = order.get_mut(best.i + 1..=best.j) {
            segment.reverse();
        }
    }
    let converged = best_move(costs, order, mode).is_none();
    if !converged {
        log::warn!("2-opt stopped after {max_passes} passes with improving moves left");
    }
    Improvement {
        moves: max_passes,
        converged,
    }
}

fn best_move(costs: &Costs<'_>, order: &[usize], mode: TripMode) -> Option<Move> {
    let last_edge = order.len().checked_sub(2)?;
    let mut best: Option<Move> = None;
    for i in 0..last_edge {
        let (Some(&a), Some(&b)) = (order.get(i), order.get(i + 1)) else {
            break;
        };
        let first_edge = costs.leg(a, b);
        let mut forward: u128 = 0;
        let mut reverse: u128 = 0;
        for j in (i + 2)..=last_edge {
            let (Some(&prev), Some(&c), Some(&e)) = (order.get(j - 1), order.get(j), order.get(j + 1))
            else {
                break;
            };
            forward = forward.saturating_add(costs.leg(prev, c));
            reverse = reverse.saturating_add(costs.leg(c, prev));
            // Reversing everything between the depot visits only flips the
            // direction of the whole round trip.
            if mode == TripMode::RoundTrip && i == 0 && j == last_edge {
                continue;
            }
            let before = first_edge
                .saturating_add(forward)
                .saturating_add(costs.leg(c, e));
            let after = costs
                .leg(a, c)
                .saturating_add(reverse)
                .saturating_add(costs.leg(b, e));
            if let Some(gain) = before.checked_sub(after).filter(|gain| *gain > 0)
                && best.is_none_or(|current| gain > current.gain)
            {
                best = Some(Move { i, j, gain });
            }
        }
    }
    best
}

/// Reverse a round trip when the reverse is cheaper, or equally cheap and
/// visits a lower index first.
pub(crate) fn orient(costs: &Costs<'_>, order: &mut Vec<usize>) {
    let reversed: Vec<usize> = order.iter().rev().copied().collect();
    let forward_cost = costs.path(order);
    let reverse_cost = costs.path(&reversed);
    if reverse_cost < forward_cost || (reverse_cost == forward_cost && reversed.get(1) < order.get(1))
    {
        *order = reversed;
    }
}
