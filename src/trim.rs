use std::ops::RangeInclusive;

use crate::{Cell, Error, Grid, GridStore, Result};

fn nonzero_span<I: Iterator<Item = bool>>(flags: I) -> Option<RangeInclusive<usize>> {
	let mut first = None;
	let mut last = 0;
	for (i, nonzero) in flags.enumerate() {
		if nonzero {
			first.get_or_insert(i);
			last = i;
		}
	}
	first.map(|f| f..=last)
}

/// Cuts all-zero rows off the top and bottom, then all-zero columns off
/// both sides, leaving the smallest rectangle holding every grain. Zero
/// rows or columns inside that rectangle are kept. Rows must all have
/// the same length.
pub fn trim_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Result<Grid> {
	if let Some(first) = rows.first() {
		let width = first.as_ref().len();
		if rows.iter().any(|r| r.as_ref().len() != width) {
			return Err(Error::Ragged);
		}
	}
	let rows = nonzero_span(rows.iter().map(|r| r.as_ref().iter().any(|&v| v > 0)))
		.map(|span| &rows[span])
		.ok_or(Error::EmptyGrid)?;
	let width = rows[0].as_ref().len();
	let cols = nonzero_span((0..width).map(|j| rows.iter().any(|r| r.as_ref()[j] > 0)))
		.ok_or(Error::EmptyGrid)?;
	Ok(rows.iter().map(|r| r.as_ref()[cols.clone()].to_vec()).collect())
}

/// The minimal bounding sub-grid of a settled pile. An all-zero grid has
/// no such rectangle and is reported as `Error::EmptyGrid`.
pub fn trim(grid: &GridStore) -> Result<Grid> {
	let rows: Vec<&[Cell]> = grid.rows().collect();
	trim_rows(&rows)
}
