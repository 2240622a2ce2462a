//! Diff calculation between the baseline and the current snapshot.
//!
//! Only additions and state transitions are change kinds. Products that
//! disappear from the listing are reported separately by [`removed`] for
//! diagnostics and never appear in the change list.

use crate::models::{ChangeRecord, ProductAvailability};

/// Compare `previous` against `current`.
///
/// Records follow the iteration order of `current` (alphabetical), so the
/// output is identical for identical inputs.
pub fn diff(previous: &ProductAvailability, current: &ProductAvailability) -> Vec<ChangeRecord> {
    current
        .iter()
        .filter_map(|(product, state)| match previous.get(product) {
            None => Some(ChangeRecord::added(product, state)),
            Some(old) if old != state => Some(ChangeRecord::transitioned(product, old, state)),
            Some(_) => None,
        })
        .collect()
}

/// Products present in `previous` but missing from `current`, alphabetically.
pub fn removed<'a>(
    previous: &'a ProductAvailability,
    current: &ProductAvailability,
) -> Vec<&'a str> {
    previous
        .iter()
        .map(|(product, _)| product)
        .filter(|product| !current.contains(product))
        .collect()
}
