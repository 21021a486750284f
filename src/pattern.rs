//! Topple patterns: how many grains a cell holds and where its excess goes.

use std::fmt;

use crate::{Cell, Error, Result};

/// Relative `(drow, dcol)` position of a neighbour receiving sand.
pub type Offset = (isize, isize);

const ORTHOGONAL: [Offset; 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [Offset; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ORTHOGONAL_2: [Offset; 4] = [(-2, 0), (2, 0), (0, -2), (0, 2)];
const KNIGHT: [Offset; 8] = [
	(-2, -1), (-2, 1), (-1, -2), (-1, 2),
	(1, -2), (1, 2), (2, -1), (2, 1),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
	name: String,
	threshold: Cell,
	offsets: Vec<Offset>,
}

impl Pattern {
	/// Builds a pattern, rejecting rule sets the engine can't settle:
	/// a zero threshold, no offsets, a cell feeding itself, or more
	/// offsets than the threshold (which would create sand).
	pub fn new(name: &str, threshold: Cell, offsets: Vec<Offset>) -> Result<Pattern> {
		let invalid = |reason| Err(Error::InvalidPattern {
			name: name.to_owned(),
			reason,
		});
		if threshold == 0 {
			return invalid("threshold must be at least 1");
		}
		if offsets.is_empty() {
			return invalid("at least one offset is required");
		}
		if offsets.contains(&(0, 0)) {
			return invalid("a cell can't topple onto itself");
		}
		if offsets.len() as u128 > threshold as u128 {
			return invalid("more offsets than the threshold would create sand");
		}
		Ok(Pattern {
			name: name.to_owned(),
			threshold,
			offsets,
		})
	}

	fn catalog(name: &str, threshold: Cell, parts: &[&[Offset]]) -> Pattern {
		Pattern {
			name: name.to_owned(),
			threshold,
			offsets: parts.concat(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Per-cell capacity; a cell holding this much or more topples.
	pub fn threshold(&self) -> Cell {
		self.threshold
	}

	pub fn offsets(&self) -> &[Offset] {
		&self.offsets
	}

	/// Every grain of a topple lands on exactly one neighbour.
	pub fn is_conservative(&self) -> bool {
		self.offsets.len() as u128 == self.threshold as u128
	}
}

impl fmt::Display for Pattern {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{:4} threshold {:2}, {:2} offsets", self.name, self.threshold, self.offsets.len())
	}
}

/// Fixed catalog of named patterns, in listing order.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
	patterns: Vec<Pattern>,
}

impl PatternRegistry {
	pub fn standard() -> PatternRegistry {
		let patterns = vec![
			Pattern::catalog("+", 4, &[&ORTHOGONAL]),
			Pattern::catalog("x", 4, &[&DIAGONAL]),
			Pattern::catalog("o", 8, &[&ORTHOGONAL, &DIAGONAL]),
			Pattern::catalog("++", 8, &[&ORTHOGONAL, &ORTHOGONAL_2]),
			Pattern::catalog("o+", 12, &[&ORTHOGONAL, &DIAGONAL, &ORTHOGONAL]),
			Pattern::catalog("ox", 12, &[&ORTHOGONAL, &DIAGONAL, &DIAGONAL]),
			Pattern::catalog("o++", 12, &[&ORTHOGONAL, &DIAGONAL, &ORTHOGONAL_2]),
			Pattern::catalog("o-+", 16, &[&ORTHOGONAL, &ORTHOGONAL, &DIAGONAL, &ORTHOGONAL_2]),
			Pattern::catalog("Y", 16, &[&ORTHOGONAL, &ORTHOGONAL_2, &KNIGHT]),
		];
		PatternRegistry {
			patterns,
		}
	}

	pub fn lookup(&self, name: &str) -> Result<&Pattern> {
		self.patterns.iter()
			.find(|p| p.name == name)
			.ok_or_else(|| Error::UnknownPattern {
				name: name.to_owned(),
				valid: self.names().map(str::to_owned).collect(),
			})
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.patterns.iter().map(|p| p.name())
	}

	pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
		self.patterns.iter()
	}
}

impl Default for PatternRegistry {
	fn default() -> Self {
		PatternRegistry::standard()
	}
}
