// Insertion-Placement Algorithm
//
// Pure core of enqueue: given the current maxima, decide where a new
// arrival lands and whether a suffix shift is needed. The queue read
// in position order must stay a priority prefix followed by normal
// entries, each class in arrival order, positions dense from 1.

use crate::domain::entry::{Position, ServiceClass};

/// Computed slot for a new arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Position the new entry takes.
    pub position: Position,
    /// When `Some(start)`, every active entry with position >= start
    /// must shift by +1 before the insert to open the slot.
    pub shift_from: Option<Position>,
}

/// Decide the position of a new arrival.
///
/// * `max_total` - highest position among all active entries, 0 if none
/// * `max_priority` - highest position among active Priority entries,
///   0 if none (ignored for Normal arrivals)
///
/// Normal arrivals append to the very back and never shift anyone.
/// Priority arrivals go right after the last active Priority entry,
/// or jump to position 1 when no Priority entry is waiting. A shift is
/// required exactly when the target slot is already at or before the
/// current tail (`max_total >= position`).
pub fn compute_placement(
    class: ServiceClass,
    max_total: Position,
    max_priority: Position,
) -> Placement {
    let position = match class {
        ServiceClass::Normal => max_total + 1,
        ServiceClass::Priority => {
            if max_priority > 0 {
                max_priority + 1
            } else {
                1
            }
        }
    };

    let shift_from = if max_total >= position {
        Some(position)
    } else {
        None
    };

    Placement {
        position,
        shift_from,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ServiceClass::{Normal, Priority};

    #[test]
    fn normal_into_empty_queue_takes_position_1() {
        let p = compute_placement(Normal, 0, 0);
        assert_eq!(p, Placement { position: 1, shift_from: None });
    }

    #[test]
    fn normal_appends_to_the_back_without_shifting() {
        let p = compute_placement(Normal, 5, 2);
        assert_eq!(p, Placement { position: 6, shift_from: None });
    }

    #[test]
    fn priority_into_empty_queue_takes_position_1() {
        let p = compute_placement(Priority, 0, 0);
        assert_eq!(p, Placement { position: 1, shift_from: None });
    }

    #[test]
    fn priority_jumps_ahead_of_normals() {
        // [N@1, N@2, N@3], no priority waiting
        let p = compute_placement(Priority, 3, 0);
        assert_eq!(p, Placement { position: 1, shift_from: Some(1) });
    }

    #[test]
    fn priority_lands_after_priority_tail() {
        // [P@1, N@2, N@3]
        let p = compute_placement(Priority, 3, 1);
        assert_eq!(p, Placement { position: 2, shift_from: Some(2) });
    }

    #[test]
    fn priority_at_the_very_end_needs_no_shift() {
        // All-priority queue [P@1, P@2]: the new slot is past the tail
        let p = compute_placement(Priority, 2, 2);
        assert_eq!(p, Placement { position: 3, shift_from: None });
    }

    #[test]
    fn normal_behind_all_priority_entries() {
        let p = compute_placement(Normal, 4, 4);
        assert_eq!(p, Placement { position: 5, shift_from: None });
    }
}
