//! Writers handing a finished grid to the outside world: text, CSV and PNG.

use std::{
	fs::File,
	io::{self, BufWriter, Write},
	path::Path,
};

use crate::Cell;

/// Palette anchors; values in between are blended.
const ANCHORS: [[u8; 3]; 4] = [
	[0, 0, 0],
	[64, 128, 0],
	[118, 8, 170],
	[255, 214, 0],
];
const UNSTABLE: [u8; 4] = [255, 255, 255, 255];

pub(crate) fn glyph(v: Cell) -> char {
	if v < 36 {
		std::char::from_digit(v as u32, 36).unwrap_or('#')
	} else {
		'#'
	}
}

pub(crate) fn ascii_row(row: &[Cell]) -> String {
	row.iter().map(|&v| glyph(v)).collect()
}

/// One line per row, one base-36 digit per cell.
pub fn render_ascii<R: AsRef<[Cell]>>(rows: &[R]) -> String {
	let mut s = String::new();
	for row in rows {
		s += &ascii_row(row.as_ref());
		s += "\n";
	}
	s
}

/// Name used for the CSV dump of a `2^sand_power` pile.
pub fn csv_file_name(sand_power: u32, pattern: &str) -> String {
	format!("2_{}_{}.csv", sand_power, pattern)
}

pub fn write_csv<R: AsRef<[Cell]>, W: Write>(rows: &[R], mut writer: W) -> io::Result<()> {
	for row in rows {
		let line: Vec<_> = row.as_ref().iter().map(Cell::to_string).collect();
		writeln!(writer, "{}", line.join(","))?;
	}
	writer.flush()
}

pub fn save_csv<R: AsRef<[Cell]>>(rows: &[R], path: &Path) -> io::Result<()> {
	write_csv(rows, BufWriter::new(File::create(path)?))
}

fn blend(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 4] {
	let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
	[mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2]), 255]
}

/// RGBA colour for each value below `threshold`.
pub fn palette(threshold: Cell) -> Vec<[u8; 4]> {
	let n = threshold.max(1) as usize;
	if n == 1 {
		return vec![blend(ANCHORS[0], ANCHORS[0], 0.0)];
	}
	(0..n).map(|v| {
		let pos = v as f32 * (ANCHORS.len() - 1) as f32 / (n - 1) as f32;
		let i = (pos.floor() as usize).min(ANCHORS.len() - 2);
		blend(ANCHORS[i], ANCHORS[i + 1], pos - i as f32)
	}).collect()
}

/// One pixel per cell; cells still at or above `threshold` are white.
pub fn png<R: AsRef<[Cell]>>(rows: &[R], threshold: Cell, path: &Path) -> io::Result<()> {
	let height = rows.len();
	let width = rows.first().map_or(0, |r| r.as_ref().len());
	let colors = palette(threshold);
	let mut pixels = vec![0; width * height * 4];
	let mut p = 0;
	for row in rows {
		for &el in row.as_ref() {
			let color = colors.get(el as usize).unwrap_or(&UNSTABLE);
			pixels[p..p+4].copy_from_slice(color);
			p += 4;
		}
	}
	repng::encode(File::create(path)?, width as u32, height as u32, &pixels)
}
