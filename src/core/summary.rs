use crate::core::models::Group;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Result of running the allocation over one group snapshot.
///
/// `grand_total` is the sum of every item's line total and always includes
/// cost that ended up assigned to nobody; that residue is reported in
/// `unassigned_total` rather than silently dropped.
#[derive(Clone, Debug, Serialize)]
pub struct BillSummary {
    pub participant_totals: HashMap<String, f64>,
    pub grand_total: f64,
    pub unassigned_total: f64,
}

impl BillSummary {
    pub fn total_for(&self, participant_id: &str) -> f64 {
        self.participant_totals.get(participant_id).copied().unwrap_or(0.0)
    }
}

/// Computes each participant's owed share and the grand total for a group.
///
/// Pure and synchronous; callers hand in a snapshot and get a fresh result.
/// Equal-split items divide across the *current* roster, so totals shift
/// retroactively when participants come or go. Divisor hazards never fail:
/// an equal split with an empty roster, or a custom split whose subset is
/// empty, contributes nothing to anyone and the amount lands in
/// `unassigned_total`. A subset id that is no longer on the roster (stale
/// data) is treated the same way so the result only ever references current
/// participants.
pub fn compute_summary(group: &Group) -> BillSummary {
    let mut participant_totals: HashMap<String, f64> =
        group.participants.iter().map(|p| (p.id.clone(), 0.0)).collect();
    let mut grand_total = 0.0;
    let mut unassigned_total = 0.0;

    for item in &group.items {
        let line_total = item.line_total();
        grand_total += line_total;

        if item.split_equally {
            if group.participants.is_empty() {
                unassigned_total += line_total;
                continue;
            }
            let share = line_total / group.participants.len() as f64;
            for participant in &group.participants {
                if let Some(total) = participant_totals.get_mut(&participant.id) {
                    *total += share;
                }
            }
        } else {
            if item.participants.is_empty() {
                unassigned_total += line_total;
                continue;
            }
            let share = line_total / item.participants.len() as f64;
            for participant_id in &item.participants {
                match participant_totals.get_mut(participant_id) {
                    Some(total) => *total += share,
                    None => unassigned_total += share,
                }
            }
        }
    }

    debug!(
        group_id = %group.id,
        grand_total,
        unassigned_total,
        "computed bill summary"
    );

    BillSummary {
        participant_totals,
        grand_total,
        unassigned_total,
    }
}
