//! Dependency layering for ratio evaluation.

use std::collections::HashSet;
use std::hash::Hash;

/// Group `nodes` and everything they transitively depend on into layers.
///
/// Every node's dependencies sit in strictly earlier layers, so the nodes of
/// one layer can be evaluated together. Within a layer, requested nodes keep
/// their order in `nodes`; dependencies pulled in follow in discovery order.
///
/// # Errors
/// Returns the nodes that could not be placed when the dependencies contain
/// a cycle.
pub fn dependency_layers<T, F, I>(nodes: &[T], deps: F) -> Result<Vec<Vec<T>>, Vec<T>>
where
    T: Copy + Eq + Hash,
    F: Fn(T) -> I,
    I: IntoIterator<Item = T>,
{
    let mut ordered: Vec<T> = Vec::new();
    let mut seen: HashSet<T> = HashSet::new();
    for &node in nodes {
        if seen.insert(node) {
            ordered.push(node);
        }
    }
    let mut next = 0;
    while next < ordered.len() {
        for dep in deps(ordered[next]) {
            if seen.insert(dep) {
                ordered.push(dep);
            }
        }
        next += 1;
    }

    let mut placed: HashSet<T> = HashSet::with_capacity(ordered.len());
    let mut remaining = ordered;
    let mut layers = Vec::new();
    while !remaining.is_empty() {
        let (ready, blocked): (Vec<T>, Vec<T>) = remaining
            .iter()
            .partition(|&&node| deps(node).into_iter().all(|dep| placed.contains(&dep)));
        if ready.is_empty() {
            return Err(blocked);
        }
        placed.extend(ready.iter().copied());
        layers.push(ready);
        remaining = blocked;
    }
    Ok(layers)
}
