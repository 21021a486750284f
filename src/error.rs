use thiserror::Error;

use crate::Cell;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
	/// Pattern name missing from the registry.
	#[error("Unknown pattern '{}'. Valid patterns: {}", .name, .valid.join(", "))]
	UnknownPattern {
		name: String,
		valid: Vec<String>,
	},
	#[error("Invalid pattern '{name}': {reason}")]
	InvalidPattern {
		name: String,
		reason: &'static str,
	},
	#[error("Coordinates ({row}, {col}) out of bounds (0..{side}, 0..{side})")]
	OutOfBounds {
		row: usize,
		col: usize,
		side: usize,
	},
	#[error("Grid is not square")]
	NotSquare,
	#[error("Rows of unequal lengths")]
	Ragged,
	#[error("Empty grid: nothing to trim")]
	EmptyGrid,
	#[error("Adding {amount} grains overflows the grid total of {total}")]
	MassOverflow {
		total: Cell,
		amount: Cell,
	},
	#[error("Sand power {power} too large, at most {max} is supported")]
	SandPowerTooLarge {
		power: u32,
		max: u32,
	},
	#[error("Can't allocate a {side}x{side} grid")]
	Allocation {
		side: usize,
	},
	#[error(transparent)]
	Io(#[from] std::io::Error),
	#[error("Failed to parse config: {0}")]
	Toml(#[from] toml::de::Error),
}
