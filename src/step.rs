//! Incremental toppling for piles consumed frame by frame.
//!
//! Snapshots taken between steps depend on the row-major scan order and
//! are only meaningful as pictures of the way to the final pile.

use log::trace;

use crate::{
	topple::{State, ToppleEngine, ToppleReport},
	Cell, Grid, GridStore, Pattern, Result, SandHeap,
};

#[derive(Debug, Clone)]
pub struct StepDriver {
	engine: ToppleEngine,
}

impl StepDriver {
	pub fn new(pattern: Pattern) -> StepDriver {
		StepDriver {
			engine: ToppleEngine::new(pattern),
		}
	}

	/// Runs at most `passes` full passes over `grid` and hands back the
	/// untrimmed grid, which may still hold cells at or above the
	/// threshold. Sand can be deposited between calls.
	pub fn step<'g>(&mut self, grid: &'g mut GridStore, passes: u64) -> &'g GridStore {
		let state = self.engine.run(grid, passes);
		trace!("step of {} passes: {:?}", passes, state);
		grid
	}

	pub fn state(&self) -> State {
		self.engine.state()
	}

	pub fn engine(&self) -> &ToppleEngine {
		&self.engine
	}

	pub(crate) fn engine_mut(&mut self) -> &mut ToppleEngine {
		&mut self.engine
	}

	pub fn report(&self) -> ToppleReport {
		self.engine.report()
	}
}

/// Snapshots of a growing pile. Each frame drops up to `grains` of the
/// undeposited starting sand on the centre cell, then runs `passes`
/// passes. The last frame is the first stable one after all sand is in.
pub struct Frames<'h> {
	heap: &'h mut SandHeap,
	grains: Cell,
	passes: u64,
	done: bool,
}

impl<'h> Frames<'h> {
	pub(crate) fn new(heap: &'h mut SandHeap, grains: Cell, passes: u64) -> Frames<'h> {
		Frames {
			heap,
			grains: grains.max(1),
			passes: passes.max(1),
			done: false,
		}
	}
}

impl Iterator for Frames<'_> {
	type Item = Result<Grid>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}
		if let Err(e) = self.heap.deposit_pending(self.grains) {
			self.done = true;
			return Some(Err(e));
		}
		let snapshot = self.heap.step(self.passes).to_rows();
		if self.heap.pending() == 0 && self.heap.state() == State::Stable {
			self.done = true;
		}
		Some(Ok(snapshot))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::PatternRegistry;

	#[test]
	fn step_returns_running_snapshot() {
		let registry = PatternRegistry::standard();
		let mut driver = StepDriver::new(registry.lookup("+").unwrap().clone());
		let mut grid = GridStore::with_centre_mass(33, 256).unwrap();
		let snapshot = driver.step(&mut grid, 1);
		assert_eq!(snapshot.side(), 33);
		// Already scanned when the centre toppled onto it.
		assert_eq!(snapshot.get(15, 16), Some(64));
		assert_eq!(driver.state(), State::Running);
	}

	#[test]
	fn deposit_between_steps() {
		let registry = PatternRegistry::standard();
		let mut driver = StepDriver::new(registry.lookup("+").unwrap().clone());
		let mut grid = GridStore::new(11).unwrap();
		for _ in 0..4 {
			grid.deposit_centre(1).unwrap();
			driver.step(&mut grid, 1);
		}
		assert_eq!(driver.state(), State::Stable);
		assert_eq!(grid.get(5, 5), Some(0));
		assert_eq!(grid.get(4, 5), Some(1));
		assert_eq!(driver.report().topples, 1);
	}
}
