//! Stabilization: scan the grid and topple every cell at or above the
//! pattern threshold until none is left.
//!
//! Grains sent past the edge of the grid are discarded. The grid never
//! wraps or grows, so a pile whose pattern reaches the border loses mass.

use log::{debug, info};

use crate::{Cell, GridStore, Pattern};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
	Running,
	Stable,
}

/// Counters accumulated over every pass an engine has run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ToppleReport {
	pub passes: u64,
	/// Single-cell topple events.
	pub topples: u64,
	/// Grains that moved to a neighbour or off the grid, saturating at
	/// `u64::MAX`.
	pub grains_moved: u64,
	/// Grains sent off the grid.
	pub discarded: u64,
}

#[inline]
fn neighbour(row: usize, col: usize, (dr, dc): (isize, isize), side: usize) -> Option<usize> {
	let r = row.checked_add_signed(dr)?;
	let c = col.checked_add_signed(dc)?;
	if r < side && c < side {
		Some(r * side + c)
	} else {
		None
	}
}

#[derive(Debug, Clone)]
pub struct ToppleEngine {
	pattern: Pattern,
	state: State,
	report: ToppleReport,
}

impl ToppleEngine {
	pub fn new(pattern: Pattern) -> ToppleEngine {
		ToppleEngine {
			pattern,
			state: State::Running,
			report: ToppleReport::default(),
		}
	}

	pub fn pattern(&self) -> &Pattern {
		&self.pattern
	}

	pub fn state(&self) -> State {
		self.state
	}

	pub fn report(&self) -> ToppleReport {
		self.report
	}

	/// True if no cell of `grid` would topple.
	pub fn is_stable(&self, grid: &GridStore) -> bool {
		grid.cells.iter().all(|&v| v < self.pattern.threshold())
	}

	/// Topples the cell at `(row, col)` once, sending `v / threshold`
	/// grains along every offset and keeping `v % threshold`. Returns the
	/// number of grains sent per offset, zero if the cell was below the
	/// threshold or out of bounds.
	pub fn topple_cell(&mut self, grid: &mut GridStore, row: usize, col: usize) -> Cell {
		let threshold = self.pattern.threshold();
		let i = match grid.idx(row, col) {
			Some(i) => i,
			None => return 0,
		};
		let d = grid.cells[i] / threshold;
		if d == 0 {
			return 0;
		}
		grid.cells[i] %= threshold;
		let mut landed: Cell = 0;
		for &offset in self.pattern.offsets() {
			if let Some(j) = neighbour(row, col, offset, grid.side) {
				grid.cells[j] += d;
				landed += 1;
			}
		}
		let lost = d * (self.pattern.offsets().len() as Cell - landed);
		// d * threshold grains left the cell, d * landed came back down.
		grid.total -= d * (threshold - landed);
		// Discards are bounded by the grid total; the other counters are not.
		self.report.topples = self.report.topples.saturating_add(1);
		self.report.grains_moved = self.report.grains_moved
			.saturating_add(d * self.pattern.offsets().len() as Cell);
		self.report.discarded += lost;
		d
	}

	/// One row-major scan toppling every cell found at or above the
	/// threshold as it is reached. Returns the number of topples.
	pub fn pass(&mut self, grid: &mut GridStore) -> u64 {
		let threshold = self.pattern.threshold();
		let side = grid.side;
		let mut count = 0;
		for row in 0..side {
			for col in 0..side {
				if grid.cells[row * side + col] >= threshold {
					self.topple_cell(grid, row, col);
					count += 1;
				}
			}
		}
		self.report.passes += 1;
		debug!("pass {}: {} topples, total {}", self.report.passes, count, grid.total);
		count
	}

	/// Runs at most `max_passes` passes, stopping early once the grid is
	/// stable.
	pub fn run(&mut self, grid: &mut GridStore, max_passes: u64) -> State {
		let mut passes = 0;
		if !self.is_stable(grid) {
			self.state = State::Running;
		}
		while passes < max_passes && !self.is_stable(grid) {
			self.pass(grid);
			passes += 1;
		}
		if self.is_stable(grid) {
			self.mark_stable(grid);
		}
		self.state
	}

	/// Passes until nothing topples. Always terminates: no valid pattern
	/// creates sand, so every topple either moves mass or discards it.
	pub fn settle(&mut self, grid: &mut GridStore) -> ToppleReport {
		self.run(grid, u64::MAX);
		self.report
	}

	fn mark_stable(&mut self, grid: &GridStore) {
		if self.state != State::Stable {
			info!(
				"pattern {} stable after {} passes ({} topples, {} discarded, {} remaining)",
				self.pattern.name(), self.report.passes, self.report.topples,
				self.report.discarded, grid.total,
			);
		}
		self.state = State::Stable;
	}
}
