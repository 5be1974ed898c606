//! Staggered highlight animation with last-call-wins cancellation.

/// Stroke applied while an edge is part of the hovered reachability set.
pub const HIGHLIGHT_STROKE: &str = "#c183fe";
/// Stroke width while highlighted.
pub const HIGHLIGHT_WIDTH: &str = "4";
/// Stroke restored when the highlight is removed.
pub const DEFAULT_STROKE: &str = "#fff";
/// Stroke width when not highlighted.
pub const DEFAULT_WIDTH: &str = "1";

/// Delay added per edge so the highlight appears to walk outward from the
/// hovered node rather than lighting everything at once.
pub const STAGGER_MS: u32 = 30;

/// Deferred, cancellable operations. The browser implementation wraps
/// `setTimeout`/`clearTimeout`; tests drive a manual queue.
pub trait Scheduler {
	/// Runs `op` after `delay_ms` unless cancelled first.
	fn schedule(&mut self, delay_ms: u32, op: Box<dyn FnOnce()>);
	/// Drops every scheduled, not-yet-fired operation so it never runs.
	/// Idempotent: safe to call with nothing pending.
	fn cancel_pending(&mut self);
}

/// Visual state the animator toggles on a rendered edge.
pub trait EdgeVisual {
	/// Applies the highlighted stroke when `on`, the default otherwise.
	fn set_emphasis(&self, on: bool);
}

/// Owns the pending timers for both traversal directions. A new `apply`
/// always cancels whatever the previous call left scheduled, so rapid
/// hover-enter/hover-leave toggling can never flip an edge's visual state
/// out of order: last call wins.
pub struct HighlightAnimator<S: Scheduler> {
	scheduler: S,
}

impl<S: Scheduler> HighlightAnimator<S> {
	/// Wraps a scheduler; the animator is its sole owner, so cancelling
	/// pending work never races another component's timers.
	pub fn new(scheduler: S) -> Self {
		Self { scheduler }
	}

	/// Highlights (staggered) or resets (immediately) the two edge
	/// sequences. One running delay counter covers both: the outbound
	/// edges animate first and the inbound edges continue the stagger
	/// right after, not interleaved and not restarted at zero.
	pub fn apply<E>(&mut self, outbound: &[E], inbound: &[E], highlight: bool)
	where
		E: EdgeVisual + Clone + 'static,
	{
		self.scheduler.cancel_pending();

		if !highlight {
			// The reset path is the only synchronous transition.
			for edge in outbound.iter().chain(inbound) {
				edge.set_emphasis(false);
			}
			return;
		}

		let mut delay = 0;
		for edge in outbound.iter().chain(inbound) {
			let edge = edge.clone();
			self.scheduler
				.schedule(delay, Box::new(move || edge.set_emphasis(true)));
			delay += STAGGER_MS;
		}
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
		lit: Rc<Cell<bool>>,
	}

	impl StubEdge {
		fn new() -> Self {
			Self {
				lit: Rc::new(Cell::new(false)),
			}
		}
	}

	impl EdgeVisual for StubEdge {
		fn set_emphasis(&self, on: bool) {
			self.lit.set(on);
		}
	}

	fn animator() -> (HighlightAnimator<ManualScheduler>, ManualScheduler) {
		let scheduler = ManualScheduler::default();
		(HighlightAnimator::new(scheduler.clone()), scheduler)
	}

	#[test]
	fn stagger_continues_across_the_direction_boundary() {
		let (mut animator, scheduler) = animator();
		let outbound = [StubEdge::new(), StubEdge::new()];
		let inbound = [StubEdge::new()];

		animator.apply(&outbound, &inbound, true);

		assert_eq!(scheduler.delays(), vec![0, 30, 60]);
	}

	#[test]
	fn edges_light_up_only_when_timers_fire() {
		let (mut animator, scheduler) = animator();
		let outbound = [StubEdge::new()];
		let inbound = [StubEdge::new()];

		animator.apply(&outbound, &inbound, true);
		assert!(!outbound[0].lit.get());
		assert!(!inbound[0].lit.get());

		scheduler.fire_all();
		assert!(outbound[0].lit.get());
		assert!(inbound[0].lit.get());
	}

	#[test]
	fn unhighlight_resets_immediately_with_nothing_scheduled() {
		let (mut animator, scheduler) = animator();
		let outbound = [StubEdge::new()];
		outbound[0].lit.set(true);

		animator.apply(&outbound, &[], false);

		assert!(!outbound[0].lit.get());
		assert!(scheduler.delays().is_empty());
	}

	#[test]
	fn unhighlight_before_firing_cancels_every_pending_highlight() {
		let (mut animator, scheduler) = animator();
		let outbound = [StubEdge::new(), StubEdge::new()];

		animator.apply(&outbound, &[], true);
		animator.apply(&outbound, &[], false);
		scheduler.fire_all();

		assert!(!outbound[0].lit.get());
		assert!(!outbound[1].lit.get());
	}

	#[test]
	fn reapply_replaces_pending_timers_instead_of_stacking() {
		let (mut animator, scheduler) = animator();
		let outbound = [StubEdge::new(), StubEdge::new()];

		animator.apply(&outbound, &[], true);
		animator.apply(&outbound, &[], true);

		assert_eq!(scheduler.delays(), vec![0, 30]);
	}
}
