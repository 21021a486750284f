//! Fixed-size square grid of sand counts.

use std::fmt;

use crate::{output, Cell, Error, Grid, Result};

/// Smallest side a grid is given, whatever its mass.
pub const MIN_SIDE: usize = 10;

/// Side length for a pile of `total` grains: the integer square root,
/// bumped to the next odd number so there is a single centre cell, and
/// never below `MIN_SIDE`. Large patterns can still spill past it.
pub fn side_length(total: Cell) -> usize {
	let mut side = isqrt(total);
	if side % 2 == 0 {
		side += 1;
	}
	(side as usize).max(MIN_SIDE)
}

fn isqrt(n: u64) -> u64 {
	let mut x = (n as f64).sqrt() as u64;
	while x as u128 * x as u128 > n as u128 {
		x -= 1;
	}
	while (x as u128 + 1) * (x as u128 + 1) <= n as u128 {
		x += 1;
	}
	x
}

/// Row-major square grid that never grows. The total mass is kept up to
/// date on every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridStore {
	pub(crate) cells: Vec<Cell>,
	pub(crate) side: usize,
	pub(crate) total: Cell,
}

impl GridStore {
	/// An all-zero grid, for piles seeded by the caller.
	pub fn new(side: usize) -> Result<GridStore> {
		if side == 0 {
			return Err(Error::EmptyGrid);
		}
		let len = side.checked_mul(side).ok_or(Error::Allocation { side })?;
		let mut cells = Vec::new();
		cells.try_reserve_exact(len).map_err(|_| Error::Allocation { side })?;
		cells.resize(len, 0);
		Ok(GridStore {
			cells,
			side,
			total: 0,
		})
	}

	/// A grid holding all of `mass` on its centre cell.
	pub fn with_centre_mass(side: usize, mass: Cell) -> Result<GridStore> {
		let mut grid = GridStore::new(side)?;
		grid.deposit_centre(mass)?;
		Ok(grid)
	}

	pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<GridStore> {
		let side = rows.len();
		if rows.iter().any(|row| row.len() != side) {
			return Err(Error::NotSquare);
		}
		let mut grid = GridStore::new(side)?;
		for (i, row) in rows.into_iter().enumerate() {
			for (j, v) in row.into_iter().enumerate() {
				grid.deposit(i, j, v)?;
			}
		}
		Ok(grid)
	}

	pub fn side(&self) -> usize {
		self.side
	}

	/// `(row, col)` of the centre cell.
	pub fn centre(&self) -> (usize, usize) {
		(self.side / 2, self.side / 2)
	}

	pub fn total(&self) -> Cell {
		self.total
	}

	pub fn max(&self) -> Cell {
		self.cells.iter().copied().max().unwrap_or(0)
	}

	pub fn is_empty(&self) -> bool {
		self.total == 0
	}

	#[inline]
	pub(crate) fn idx(&self, row: usize, col: usize) -> Option<usize> {
		if row < self.side && col < self.side {
			Some(row * self.side + col)
		} else {
			None
		}
	}

	fn checked_idx(&self, row: usize, col: usize) -> Result<usize> {
		self.idx(row, col).ok_or(Error::OutOfBounds {
			row,
			col,
			side: self.side,
		})
	}

	pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
		self.idx(row, col).map(|i| self.cells[i])
	}

	pub fn set(&mut self, row: usize, col: usize, value: Cell) -> Result<()> {
		let i = self.checked_idx(row, col)?;
		let rest = self.total - self.cells[i];
		self.total = rest.checked_add(value).ok_or(Error::MassOverflow {
			total: rest,
			amount: value,
		})?;
		self.cells[i] = value;
		Ok(())
	}

	/// Adds `amount` grains to one cell.
	pub fn deposit(&mut self, row: usize, col: usize, amount: Cell) -> Result<()> {
		let i = self.checked_idx(row, col)?;
		self.total = self.total.checked_add(amount).ok_or(Error::MassOverflow {
			total: self.total,
			amount,
		})?;
		self.cells[i] += amount;
		Ok(())
	}

	pub fn deposit_centre(&mut self, amount: Cell) -> Result<()> {
		let (row, col) = self.centre();
		self.deposit(row, col, amount)
	}

	/// Rows in scan order.
	pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
		self.cells.chunks_exact(self.side)
	}

	pub fn to_rows(&self) -> Grid {
		self.rows().map(<[Cell]>::to_vec).collect()
	}
}

impl fmt::Display for GridStore {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for row in self.rows() {
			writeln!(f, "{}", output::ascii_row(row))?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn side_length_is_odd_or_clamped() {
		assert_eq!(side_length(4), MIN_SIDE);
		assert_eq!(side_length(1), MIN_SIDE);
		assert_eq!(side_length(1 << 10), 33);
		assert_eq!(side_length(1 << 12), 65);
		assert_eq!(side_length(1 << 13), 91);
		assert_eq!(side_length(121), 11);
		assert_eq!(side_length(143), 11);
		assert_eq!(side_length(144), 13);
	}

	#[test]
	fn isqrt_is_exact() {
		assert_eq!(isqrt(0), 0);
		assert_eq!(isqrt(99), 9);
		assert_eq!(isqrt(100), 10);
		assert_eq!(isqrt(u64::MAX), 4_294_967_295);
	}

	#[test]
	fn centre_mass() {
		let grid = GridStore::with_centre_mass(11, 42).unwrap();
		assert_eq!(grid.centre(), (5, 5));
		assert_eq!(grid.get(5, 5), Some(42));
		assert_eq!(grid.total(), 42);
		assert_eq!(grid.max(), 42);
	}

	#[test]
	fn bounds_checked() {
		let mut grid = GridStore::new(10).unwrap();
		assert_eq!(grid.get(10, 0), None);
		assert!(matches!(grid.set(0, 10, 1), Err(Error::OutOfBounds { row: 0, col: 10, side: 10 })));
		assert!(matches!(grid.deposit(12, 0, 1), Err(Error::OutOfBounds { .. })));
		assert!(grid.is_empty());
	}

	#[test]
	fn set_tracks_total() {
		let mut grid = GridStore::new(10).unwrap();
		grid.set(1, 1, 7).unwrap();
		grid.set(2, 2, 3).unwrap();
		grid.set(1, 1, 2).unwrap();
		assert_eq!(grid.total(), 5);
	}

	#[test]
	fn deposit_overflow_is_an_error() {
		let mut grid = GridStore::with_centre_mass(10, Cell::MAX).unwrap();
		assert!(matches!(grid.deposit(0, 0, 1), Err(Error::MassOverflow { .. })));
		assert_eq!(grid.total(), Cell::MAX);
		assert_eq!(grid.get(0, 0), Some(0));
	}

	#[test]
	fn from_rows_requires_square() {
		assert!(matches!(GridStore::from_rows(vec![vec![1, 2], vec![3]]), Err(Error::NotSquare)));
		assert!(matches!(GridStore::from_rows(vec![]), Err(Error::EmptyGrid)));
		let grid = GridStore::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
		assert_eq!(grid.total(), 10);
		assert_eq!(grid.to_rows(), vec![vec![1, 2], vec![3, 4]]);
	}

	#[test]
	fn display_one_glyph_per_cell() {
		let grid = GridStore::from_rows(vec![vec![0, 1], vec![10, 3]]).unwrap();
		assert_eq!(grid.to_string(), "01\na3\n");
	}

	#[test]
	fn huge_side_fails_to_allocate() {
		assert!(matches!(GridStore::new(usize::MAX), Err(Error::Allocation { .. })));
	}
}
