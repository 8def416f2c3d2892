//! Helpers for the ordered ID lists that sit next to the keyed maps.

use std::collections::{BTreeMap, BTreeSet};

/// Moves the element at `from` to position `to`, shifting the elements in between.
///
/// Presentation layers use this to build the payload of the reorder actions.
/// Out-of-range indexes return the list unchanged.
pub fn reorder<T: Clone>(list: &[T], from: usize, to: usize) -> Vec<T> {
    let mut result = list.to_vec();
    if from >= result.len() || to >= result.len() {
        return result;
    }
    let moved = result.remove(from);
    result.insert(to, moved);
    result
}

/// Returns true if `order` lists every key of `map` exactly once and nothing else.
pub fn is_permutation_of<V>(order: &[String], map: &BTreeMap<String, V>) -> bool {
    if order.len() != map.len() {
        return false;
    }
    let unique: BTreeSet<&String> = order.iter().collect();
    unique.len() == order.len() && order.iter().all(|id| map.contains_key(id))
}
