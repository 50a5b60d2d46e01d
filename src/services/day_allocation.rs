//! Day Allocation
//!
//! Splits the total trip length across the visited destinations in proportion
//! to each destination's typical stay length. Allocations are rounded half to
//! even and floored at one day per destination. A rounding surplus goes to the
//! destination with the largest allocation; a shortfall is taken back one day
//! at a time from the largest allocation still above one day. The days always
//! add up to the trip length.

use crate::services::knowledge_base::KnowledgeBase;
use log::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationDays {
    pub destination: String,
    pub days: u32,
}

/// Allocate `total_days` across `destinations`, preserving their order.
///
/// When there are more destinations than days, only the first `total_days`
/// destinations are kept, one day each.
pub fn allocate_days(
    knowledge_base: &KnowledgeBase,
    destinations: &[String],
    total_days: u32,
) -> Vec<DestinationDays> {
    let destinations = if destinations.len() > total_days as usize {
        let (kept, dropped) = destinations.split_at(total_days as usize);
        warn!(
            "{} days cannot cover {} destinations, dropping {:?}",
            total_days,
            destinations.len(),
            dropped
        );
        kept
    } else {
        destinations
    };

    match destinations {
        [] => Vec::new(),
        [only] => vec![DestinationDays {
            destination: only.clone(),
            days: total_days,
        }],
        _ => proportional_allocation(knowledge_base, destinations, total_days),
    }
}

fn proportional_allocation(
    knowledge_base: &KnowledgeBase,
    destinations: &[String],
    total_days: u32,
) -> Vec<DestinationDays> {
    let recommended: Vec<u32> = destinations
        .iter()
        .map(|d| knowledge_base.typical_stay_length(d))
        .collect();
    let total_recommended: u32 = recommended.iter().sum();

    let mut allocation: Vec<DestinationDays> = destinations
        .iter()
        .zip(&recommended)
        .map(|(destination, typical)| {
            let share = (*typical as f64 / total_recommended as f64) * total_days as f64;
            DestinationDays {
                destination: destination.clone(),
                days: (share.round_ties_even() as u32).max(1),
            }
        })
        .collect();

    let allocated: u32 = allocation.iter().map(|a| a.days).sum();
    if allocated < total_days {
        if let Some(index) = index_of_largest(&allocation, 0) {
            allocation[index].days += total_days - allocated;
        }
    } else {
        // Callers keep at most one destination per day, so enough destinations
        // stay above one day to absorb the excess.
        for _ in total_days..allocated {
            match index_of_largest(&allocation, 1) {
                Some(index) => allocation[index].days -= 1,
                None => break,
            }
        }
    }

    allocation
}

/// First destination holding the most days, considering only those above `floor`.
fn index_of_largest(allocation: &[DestinationDays], floor: u32) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, entry) in allocation.iter().enumerate() {
        if entry.days <= floor {
            continue;
        }
        match best {
            Some(b) if allocation[b].days >= entry.days => {}
            _ => best = Some(i),
        }
    }
    best
}
