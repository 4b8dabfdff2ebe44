//! Calendar date to compressed day index.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::Bout;

/// Assign each bout the 1-based rank of its date among all bout dates.
///
/// Calendar days without bouts are skipped, so consecutive recording days
/// always differ by one. Returns the number of distinct days.
pub fn assign_day_indices(bouts: &mut [Bout]) -> usize {
    let days: Vec<NaiveDate> = bouts
        .iter()
        .map(|bout| bout.date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    for bout in bouts.iter_mut() {
        // Every date is present by construction.
        let rank = days.binary_search(&bout.date).unwrap_or_default();
        bout.day_index = u32::try_from(rank + 1).unwrap_or(u32::MAX);
    }

    days.len()
}
