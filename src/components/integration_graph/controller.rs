//! Wires node hover events to reachability and the highlight animator.

use super::highlight::{EdgeVisual, HighlightAnimator, Scheduler};
use super::reach::{self, Direction, RenderedEdge};

/// Recomputes the reachable edge sets fresh on every hover event and hands
/// them to the animator. No caching: cost is bounded by the edge count and
/// hover events arrive at human rate.
pub struct InteractionController<E, S: Scheduler> {
	edges: Vec<E>,
	animator: HighlightAnimator<S>,
}

impl<E, S> InteractionController<E, S>
where
	E: RenderedEdge + EdgeVisual + Clone + 'static,
	S: Scheduler,
{
	/// Takes ownership of the rendered edge collection for the lifetime of
	/// the graph view.
	pub fn new(edges: Vec<E>, scheduler: S) -> Self {
		Self {
			edges,
			animator: HighlightAnimator::new(scheduler),
		}
	}

	/// Hover entered `node_id`: stagger-highlight its full reachability set.
	pub fn hover_enter(&mut self, node_id: &str) {
		self.toggle(node_id, true);
	}

	/// Hover left `node_id`: reset the same set immediately.
	pub fn hover_leave(&mut self, node_id: &str) {
		self.toggle(node_id, false);
	}

	fn toggle(&mut self, node_id: &str, highlight: bool) {
		let outbound = self.collect(node_id, Direction::Outbound);
		let inbound = self.collect(node_id, Direction::Inbound);
		self.animator.apply(&outbound, &inbound, highlight);
	}

	fn collect(&self, node_id: &str, direction: Direction) -> Vec<E> {
		reach::reachable(node_id, &self.edges, direction)
			.into_iter()
			.map(|idx| self.edges[idx].clone())
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use std::cell::{Cell, RefCell};
	use std::rc::Rc;

	use super::*;

	#[derive(Clone, Default)]
	struct ManualScheduler(Rc<RefCell<Vec<(u32, Box<dyn FnOnce()>)>>>);

	impl Scheduler for ManualScheduler {
		fn schedule(&mut self, delay_ms: u32, op: Box<dyn FnOnce()>) {
			self.0.borrow_mut().push((delay_ms, op));
		}

		fn cancel_pending(&mut self) {
			self.0.borrow_mut().clear();
		}
	}

	impl ManualScheduler {
		fn delays(&self) -> Vec<u32> {
			self.0.borrow().iter().map(|(d, _)| *d).collect()
		}

		fn fire_all(&self) {
			let ops: Vec<_> = self.0.borrow_mut().drain(..).collect();
			for (_, op) in ops {
				op();
			}
		}
	}

	#[derive(Clone)]
	struct StubEdge {
		from: &'static str,
		to: &'static str,
		lit: Rc<Cell<bool>>,
	}

	impl StubEdge {
		fn new(from: &'static str, to: &'static str) -> Self {
			Self {
				from,
				to,
				lit: Rc::new(Cell::new(false)),
			}
		}
	}

	impl RenderedEdge for StubEdge {
		fn from_id(&self) -> &str {
			self.from
		}
		fn to_id(&self) -> &str {
			self.to
		}
	}

	impl EdgeVisual for StubEdge {
		fn set_emphasis(&self, on: bool) {
			self.lit.set(on);
		}
	}

	#[test]
	fn hovering_a_middle_node_highlights_exactly_its_closure() {
		// A -> B -> C plus an unrelated edge D -> E.
		let edges = vec![
			StubEdge::new("1", "2"),
			StubEdge::new("2", "3"),
			StubEdge::new("4", "5"),
		];
		let scheduler = ManualScheduler::default();
		let mut controller = InteractionController::new(edges.clone(), scheduler.clone());

		controller.hover_enter("2");
		// One outbound edge at 0 ms, one inbound continuing at 30 ms.
		assert_eq!(scheduler.delays(), vec![0, 30]);

		scheduler.fire_all();
		assert!(edges[0].lit.get());
		assert!(edges[1].lit.get());
		assert!(!edges[2].lit.get());
	}

	#[test]
	fn hover_leave_resets_without_waiting() {
		let edges = vec![StubEdge::new("1", "2"), StubEdge::new("2", "3")];
		let scheduler = ManualScheduler::default();
		let mut controller = InteractionController::new(edges.clone(), scheduler.clone());

		controller.hover_enter("1");
		scheduler.fire_all();
		assert!(edges[0].lit.get() && edges[1].lit.get());

		controller.hover_leave("1");
		assert!(!edges[0].lit.get() && !edges[1].lit.get());
		assert!(scheduler.delays().is_empty());
	}

	#[test]
	fn leave_before_any_timer_fires_keeps_every_edge_dark() {
		let edges = vec![StubEdge::new("1", "2"), StubEdge::new("2", "3")];
		let scheduler = ManualScheduler::default();
		let mut controller = InteractionController::new(edges.clone(), scheduler.clone());

		controller.hover_enter("1");
		controller.hover_leave("1");
		scheduler.fire_all();

		assert!(!edges[0].lit.get());
		assert!(!edges[1].lit.get());
	}
}
