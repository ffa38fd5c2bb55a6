//! Dependency graph between cells.
//!
//! ```text
//! forward[B] = {A, ...}   B's formula reads A
//! reverse[A] = {B, ...}   A is read by B
//! ```
//!
//! The two maps are exact inverses of each other. [`DependencyGraph::update`]
//! is the only mutator and rewrites both sides in one call. Empty entries are
//! removed rather than stored.

use std::collections::{HashMap, HashSet};

use tabula_engine::engine::Position;

#[derive(Debug, Default, Clone)]
pub(crate) struct DependencyGraph {
    /// Sorted, unique positions each formula cell reads.
    forward: HashMap<Position, Vec<Position>>,
    /// Cells reading each position.
    reverse: HashMap<Position, HashSet<Position>>,
}

impl DependencyGraph {
    pub(crate) fn precedents(&self, pos: &Position) -> &[Position] {
        self.forward.get(pos).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn dependents(&self, pos: &Position) -> impl Iterator<Item = &Position> + '_ {
        self.reverse.get(pos).into_iter().flatten()
    }

    pub(crate) fn is_referenced(&self, pos: &Position) -> bool {
        self.reverse.contains_key(pos)
    }

    /// Find the path by which making `pos` read `new_deps` would close a
    /// cycle, searching the graph as it is now. The returned path starts and
    /// ends at `pos`. Must run before [`update`](Self::update).
    ///
    /// Iterative depth-first search: chains may be as long as the grid.
    pub(crate) fn find_cycle(&self, pos: &Position, new_deps: &[Position]) -> Option<Vec<Position>> {
        let mut visited = HashSet::new();
        // First position each visited cell was reached from.
        let mut came_from: HashMap<Position, Position> = HashMap::new();
        let mut to_process: Vec<(Position, Position)> =
            new_deps.iter().rev().map(|dep| (*dep, *pos)).collect();

        while let Some((current, from)) = to_process.pop() {
            if current == *pos {
                return Some(trace_back(pos, from, &came_from));
            }
            if !visited.insert(current) {
                continue;
            }
            came_from.insert(current, from);
            to_process.extend(self.precedents(&current).iter().rev().map(|next| (*next, current)));
        }
        None
    }

    /// Replace the edges out of `pos` with `new_deps` (sorted, unique).
    /// An empty list removes `pos` from the graph as a reader.
    pub(crate) fn update(&mut self, pos: Position, new_deps: Vec<Position>) {
        if let Some(old_deps) = self.forward.remove(&pos) {
            for old in old_deps {
                if let Some(readers) = self.reverse.get_mut(&old) {
                    readers.remove(&pos);
                    if readers.is_empty() {
                        self.reverse.remove(&old);
                    }
                }
            }
        }

        if new_deps.is_empty() {
            return;
        }

        for dep in &new_deps {
            self.reverse.entry(*dep).or_default().insert(pos);
        }
        self.forward.insert(pos, new_deps);
    }

    /// Walk reverse edges from `pos`, calling `visit` on `pos` and on each
    /// reachable position at most once. Readers of a position are only
    /// followed when `visit` returns true for it; `pos` itself is always
    /// followed.
    pub(crate) fn walk_dependents<F>(&self, pos: Position, mut visit: F) -> usize
    where
        F: FnMut(&Position) -> bool,
    {
        let mut to_process = vec![pos];
        let mut visited = HashSet::new();

        while let Some(current) = to_process.pop() {
            if !visited.insert(current) {
                continue;
            }
            if visit(&current) || current == pos {
                to_process.extend(self.dependents(&current).copied());
            }
        }

        visited.len()
    }
}

/// Rebuild `pos -> ... -> from -> pos` from the search's back-pointers.
fn trace_back(pos: &Position, from: Position, came_from: &HashMap<Position, Position>) -> Vec<Position> {
    let mut path = vec![*pos];
    let mut node = from;
    while node != *pos {
        path.push(node);
        match came_from.get(&node) {
            Some(prev) => node = *prev,
            None => break,
        }
    }
    path.push(*pos);
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::DependencyGraph;
    use tabula_engine::engine::Position;

    fn p(a1: &str) -> Position {
        Position::from_a1(a1).unwrap()
    }

    #[test]
    fn test_update_keeps_maps_inverse() {
        let mut graph = DependencyGraph::default();
        graph.update(p("C1"), vec![p("A1"), p("B1")]);
        assert_eq!(graph.precedents(&p("C1")), &[p("A1"), p("B1")]);
        assert_eq!(graph.dependents(&p("A1")).collect::<Vec<_>>(), vec![&p("C1")]);

        graph.update(p("C1"), vec![p("B1"), p("D1")]);
        assert!(!graph.is_referenced(&p("A1")));
        assert!(graph.is_referenced(&p("B1")));
        assert!(graph.is_referenced(&p("D1")));

        graph.update(p("C1"), Vec::new());
        assert!(graph.precedents(&p("C1")).is_empty());
        assert!(!graph.is_referenced(&p("B1")));
        assert!(graph.forward.is_empty());
        assert!(graph.reverse.is_empty());
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let graph = DependencyGraph::default();
        assert_eq!(graph.find_cycle(&p("A1"), &[p("A1")]), Some(vec![p("A1"), p("A1")]));
    }

    #[test]
    fn test_transitive_cycle_reports_path() {
        let mut graph = DependencyGraph::default();
        graph.update(p("B1"), vec![p("C1")]);
        graph.update(p("C1"), vec![p("A1")]);
        assert_eq!(
            graph.find_cycle(&p("A1"), &[p("B1")]),
            Some(vec![p("A1"), p("B1"), p("C1"), p("A1")])
        );
        assert_eq!(graph.find_cycle(&p("A1"), &[p("C2")]), None);
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let mut graph = DependencyGraph::default();
        graph.update(p("B1"), vec![p("A1")]);
        graph.update(p("B2"), vec![p("A1")]);
        graph.update(p("C1"), vec![p("B1"), p("B2")]);
        assert_eq!(graph.find_cycle(&p("D1"), &[p("C1"), p("B1")]), None);
    }

    #[test]
    fn test_find_cycle_terminates_on_existing_cycle() {
        let mut graph = DependencyGraph::default();
        graph.update(p("A1"), vec![p("B1")]);
        graph.update(p("B1"), vec![p("A1")]);
        assert_eq!(graph.find_cycle(&p("C1"), &[p("A1")]), None);
    }

    #[test]
    fn test_walk_dependents_visits_each_once() {
        let mut graph = DependencyGraph::default();
        graph.update(p("B1"), vec![p("A1")]);
        graph.update(p("B2"), vec![p("A1")]);
        graph.update(p("C1"), vec![p("B1"), p("B2")]);

        let mut reached = Vec::new();
        let count = graph.walk_dependents(p("A1"), |pos| {
            reached.push(*pos);
            true
        });
        reached.sort();
        assert_eq!(count, 4);
        assert_eq!(reached, vec![p("A1"), p("B1"), p("C1"), p("B2")]);
    }

    #[test]
    fn test_walk_dependents_stops_where_visit_says() {
        let mut graph = DependencyGraph::default();
        graph.update(p("A2"), vec![p("A1")]);
        graph.update(p("A3"), vec![p("A2")]);

        let mut reached = Vec::new();
        graph.walk_dependents(p("A1"), |pos| {
            reached.push(*pos);
            false
        });
        assert_eq!(reached, vec![p("A1"), p("A2")]);
    }

    #[test]
    fn test_find_cycle_on_long_chain_does_not_recurse() {
        let mut graph = DependencyGraph::default();
        let rows = 200_000;
        for row in 1..rows {
            graph.update(Position::new(row, 0), vec![Position::new(row - 1, 0)]);
        }
        let top = Position::new(rows - 1, 0);
        let bottom = Position::new(0, 0);

        let path = graph.find_cycle(&bottom, &[top]).unwrap();
        assert_eq!(path.len(), rows + 1);
        assert_eq!(path.first(), Some(&bottom));
        assert_eq!(path[1], top);
        assert_eq!(path.last(), Some(&bottom));

        assert_eq!(graph.find_cycle(&Position::new(0, 1), &[top]), None);
    }
}
