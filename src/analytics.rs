//! Disease frequency distribution
//!
//! Turns a total row count and per-condition group counts into
//! `ConditionFrequency` entries, most frequent condition first.

use std::cmp::Ordering;

use crate::model::ConditionFrequency;

/// Group count for one condition; `None` is the NULL-condition group
pub type ConditionGroup = (Option<String>, u64);

/// Order groups by count descending, then by condition name ascending.
/// The NULL group sorts after every named condition with the same count.
pub fn frequency_order(a: &ConditionGroup, b: &ConditionGroup) -> Ordering {
    b.1.cmp(&a.1)
        .then_with(|| a.0.is_none().cmp(&b.0.is_none()))
        .then_with(|| a.0.cmp(&b.0))
}

/// Compute the probability of each condition.
///
/// A zero total yields an empty distribution; no division is attempted.
pub fn disease_probabilities(total: u64, mut groups: Vec<ConditionGroup>) -> Vec<ConditionFrequency> {
    if total == 0 {
        return Vec::new();
    }

    groups.sort_by(frequency_order);

    groups
        .into_iter()
        .map(|(medical_condition, count)| ConditionFrequency {
            medical_condition,
            count,
            probability: count as f64 / total as f64,
        })
        .collect()
}
