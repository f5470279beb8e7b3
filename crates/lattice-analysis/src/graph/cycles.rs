//! Circular dependency detection over the assembled graph.

use lattice_core::types::collections::FxHashSet;
use petgraph::graphmap::DiGraphMap;

use super::types::DependencyGraph;

/// Enumerate directed cycles reachable by depth-first search from every node
/// not yet visited.
///
/// Semantics, preserved exactly for downstream parity:
/// - the global visited set is never cleared, so a node exhausted from an
///   earlier root is not re-explored from a later root even if a cycle through
///   it is only reachable that way;
/// - cycles are recorded as the path suffix from the repeated node's first
///   occurrence, with the repeated node appended to close the walk;
/// - cycles are not deduplicated or canonicalized — two rotations of one cycle
///   may both appear when reached from different roots;
/// - traversal continues past a detected cycle.
///
/// The walk uses an explicit stack, so graph size is bounded by memory rather
/// than call-stack depth.
pub fn detect_circular_dependencies(graph: &DependencyGraph) -> Vec<Vec<String>> {
    // GraphMap keeps nodes and adjacency in insertion order, which makes the
    // enumeration deterministic for a given input.
    let mut adjacency: DiGraphMap<&str, ()> = DiGraphMap::new();
    for node in &graph.nodes {
        adjacency.add_node(node.id.as_str());
    }
    for edge in &graph.edges {
        adjacency.add_edge(edge.source.as_str(), edge.target.as_str(), ());
    }

    let mut visited: FxHashSet<&str> = FxHashSet::default();
    let mut cycles: Vec<Vec<String>> = Vec::new();

    for root in graph.nodes.iter().map(|n| n.id.as_str()) {
        if visited.contains(root) {
            continue;
        }

        // One DFS frame per node on the current path: the node plus its
        // outgoing neighbors and a cursor into them.
        let mut frames: Vec<(&str, Vec<&str>, usize)> = Vec::new();
        let mut path: Vec<&str> = Vec::new();
        let mut on_path: FxHashSet<&str> = FxHashSet::default();

        visited.insert(root);
        on_path.insert(root);
        path.push(root);
        frames.push((root, adjacency.neighbors(root).collect(), 0));

        while let Some((_, neighbors, cursor)) = frames.last_mut() {
            if *cursor >= neighbors.len() {
                // Backtrack: pop the frame and the path entry together.
                if let Some((node, _, _)) = frames.pop() {
                    on_path.remove(node);
                    path.pop();
                }
                continue;
            }

            let next = neighbors[*cursor];
            *cursor += 1;

            if on_path.contains(next) {
                // Closed walk: suffix from the first occurrence of `next`.
                if let Some(start) = path.iter().position(|&n| n == next) {
                    let mut cycle: Vec<String> =
                        path[start..].iter().map(|n| n.to_string()).collect();
                    cycle.push(next.to_string());
                    cycles.push(cycle);
                }
                continue;
            }

            if visited.contains(next) {
                continue;
            }

            visited.insert(next);
            on_path.insert(next);
            path.push(next);
            frames.push((next, adjacency.neighbors(next).collect(), 0));
        }
    }

    cycles
}
