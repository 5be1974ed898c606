//! Breadth-first reachability over the rendered edge collection.

use std::collections::{HashSet, VecDeque};

/// Which way to follow link direction from the start node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
	/// Follow links backward: edges whose destination is the current node.
	Inbound,
	/// Follow links forward: edges whose source is the current node.
	Outbound,
}

/// A drawn edge the engine can recover directed endpoints from.
pub trait RenderedEdge {
	/// Source node id.
	fn from_id(&self) -> &str;
	/// Destination node id.
	fn to_id(&self) -> &str;
}

/// Recovers `(from, to)` from a rendered edge's element id. The endpoints
/// are the second and third underscore-delimited segments, e.g. `L_a_b_0`.
/// This is the wire contract with the diagram renderer; everything after
/// parsing works on the typed pair.
pub fn parse_edge_id(id: &str) -> Option<(&str, &str)> {
	let mut parts = id.split('_');
	parts.next()?;
	match (parts.next(), parts.next()) {
		(Some(from), Some(to)) if !from.is_empty() && !to.is_empty() => Some((from, to)),
		_ => None,
	}
}

/// Collects the indices of every edge reachable from `start` in the given
/// direction, in discovery order. The edge collection is treated as an
/// implicit adjacency list and rescanned per expansion step; edge counts
/// are small enough that no adjacency structure is materialized.
///
/// The visited set is keyed by edge identity, not node identity: a node may
/// be re-entered through a distinct edge (so diamond-shaped graphs light up
/// every reachable edge), while an already-taken edge is never taken twice,
/// which is what bounds cycles.
pub fn reachable<'a, E: RenderedEdge>(
	start: &'a str,
	edges: &'a [E],
	direction: Direction,
) -> Vec<usize> {
	let mut queue: VecDeque<&str> = VecDeque::from([start]);
	let mut visited: HashSet<usize> = HashSet::new();
	let mut found = Vec::new();

	while let Some(current) = queue.pop_front() {
		for (idx, edge) in edges.iter().enumerate() {
			if visited.contains(&idx) {
				continue;
			}
			let (here, next) = match direction {
				Direction::Outbound => (edge.from_id(), edge.to_id()),
				Direction::Inbound => (edge.to_id(), edge.from_id()),
			};
			if here == current {
				visited.insert(idx);
				queue.push_back(next);
				found.push(idx);
			}
		}
	}
	found
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Edge(&'static str, &'static str);

	impl RenderedEdge for Edge {
		fn from_id(&self) -> &str {
			self.0
		}
		fn to_id(&self) -> &str {
			self.1
		}
	}

	#[test]
	fn parses_endpoints_from_positional_segments() {
		assert_eq!(parse_edge_id("L_a_b_0"), Some(("a", "b")));
		assert_eq!(parse_edge_id("L_1_2"), Some(("1", "2")));
		assert_eq!(parse_edge_id("arrowhead"), None);
		assert_eq!(parse_edge_id("L_only"), None);
		assert_eq!(parse_edge_id("L__b_0"), None);
	}

	#[test]
	fn outbound_walks_forward_in_discovery_order() {
		let edges = [Edge("a", "b"), Edge("b", "c"), Edge("c", "d")];
		assert_eq!(reachable("b", &edges, Direction::Outbound), vec![1, 2]);
	}

	#[test]
	fn inbound_walks_backward() {
		let edges = [Edge("a", "b"), Edge("b", "c"), Edge("c", "d")];
		assert_eq!(reachable("c", &edges, Direction::Inbound), vec![1, 0]);
	}

	#[test]
	fn cycle_terminates_with_each_edge_exactly_once() {
		let edges = [Edge("a", "b"), Edge("b", "a")];
		assert_eq!(reachable("a", &edges, Direction::Outbound), vec![0, 1]);
	}

	#[test]
	fn diamond_reaches_every_edge_via_edge_identity_dedup() {
		let edges = [
			Edge("a", "b"),
			Edge("a", "c"),
			Edge("b", "d"),
			Edge("c", "d"),
		];
		// `d` is entered twice, once per distinct edge.
		assert_eq!(
			reachable("a", &edges, Direction::Outbound),
			vec![0, 1, 2, 3]
		);
	}

	#[test]
	fn result_is_bounded_by_edge_count_with_parallel_edges() {
		// Two links share the same endpoint pair with different types.
		let edges = [Edge("a", "b"), Edge("a", "b"), Edge("b", "a")];
		let found = reachable("a", &edges, Direction::Outbound);
		assert_eq!(found, vec![0, 1, 2]);
	}

	#[test]
	fn unknown_start_yields_nothing() {
		let edges = [Edge("a", "b")];
		assert!(reachable("zz", &edges, Direction::Outbound).is_empty());
	}
}
