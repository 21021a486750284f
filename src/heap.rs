use log::info;

use crate::{
	grid::side_length,
	step::{Frames, StepDriver},
	topple::{State, ToppleReport},
	trim, Cell, Config, Grid, GridStore, Pattern, PatternRegistry, Result,
};

/// One pile: a grid sized for `2^sand_power` grains bound to a pattern.
#[derive(Debug, Clone)]
pub struct SandHeap {
	sand_power: u32,
	starting_sand: Cell,
	for_animation: bool,
	pending: Cell,
	grid: GridStore,
	driver: StepDriver,
}

impl SandHeap {
	/// Looks the pattern up and builds the grid. Unless the config is for
	/// animation, every grain starts on the centre cell; otherwise the
	/// grid is empty and the sand is dropped in by `frames` or the caller.
	pub fn new(config: &Config, registry: &PatternRegistry) -> Result<SandHeap> {
		let pattern = registry.lookup(&config.pattern)?;
		let starting_sand = config.starting_sand()?;
		let side = side_length(starting_sand);
		let (grid, pending) = if config.for_animation {
			(GridStore::new(side)?, starting_sand)
		} else {
			(GridStore::with_centre_mass(side, starting_sand)?, 0)
		};
		info!(
			"starting sand: {}, pattern: {}, side length: {}",
			starting_sand, pattern.name(), side,
		);
		Ok(SandHeap {
			sand_power: config.sand_power,
			starting_sand,
			for_animation: config.for_animation,
			pending,
			grid,
			driver: StepDriver::new(pattern.clone()),
		})
	}

	pub fn sand_power(&self) -> u32 {
		self.sand_power
	}

	pub fn starting_sand(&self) -> Cell {
		self.starting_sand
	}

	pub fn for_animation(&self) -> bool {
		self.for_animation
	}

	/// Starting sand not yet dropped on the grid.
	pub fn pending(&self) -> Cell {
		self.pending
	}

	pub fn pattern(&self) -> &Pattern {
		self.driver.engine().pattern()
	}

	pub fn grid(&self) -> &GridStore {
		&self.grid
	}

	pub fn grid_mut(&mut self) -> &mut GridStore {
		&mut self.grid
	}

	pub fn state(&self) -> State {
		self.driver.state()
	}

	pub fn report(&self) -> ToppleReport {
		self.driver.report()
	}

	/// Topples until stable and returns the trimmed pile.
	pub fn stabilize(&mut self) -> Result<Grid> {
		self.driver.engine_mut().settle(&mut self.grid);
		trim(&self.grid)
	}

	/// At most `passes` passes; the grid is returned untrimmed.
	pub fn step(&mut self, passes: u64) -> &GridStore {
		self.driver.step(&mut self.grid, passes)
	}

	/// Drops up to `amount` of the pending sand on the centre cell.
	pub(crate) fn deposit_pending(&mut self, amount: Cell) -> Result<()> {
		let amount = amount.min(self.pending);
		if amount > 0 {
			self.grid.deposit_centre(amount)?;
			self.pending -= amount;
		}
		Ok(())
	}

	pub fn frames(&mut self, grains_per_frame: Cell, passes_per_frame: u64) -> Frames<'_> {
		Frames::new(self, grains_per_frame, passes_per_frame)
	}
}
