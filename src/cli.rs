//! Command-line driver: build a pile, topple it, write it out.

use std::{
	fs,
	path::{Path, PathBuf},
	process::ExitCode,
	time::Instant,
};

use clap::Parser;
use log::info;

use sandheap::{
	output::{csv_file_name, png, render_ascii, save_csv},
	trim, Cell, Config, Error, Grid, PatternRegistry, SandHeap,
};

const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// Topple a pile of 2^SAND_POWER grains dropped on the centre of a grid
#[derive(Parser, Debug)]
#[command(name = "sandheap", version)]
pub struct Cli {
	/// The pile holds 2^SAND_POWER grains [default: 10]
	pub sand_power: Option<u32>,

	/// Topple pattern, see --list-patterns [default: +]
	pub pattern: Option<String>,

	/// TOML file with sand_power, pattern and for_animation
	#[arg(short, long)]
	pub config: Option<PathBuf>,

	/// Start empty and drop the sand in frame by frame
	#[arg(long)]
	pub animate: bool,

	/// Grains dropped on the centre per frame
	#[arg(long, default_value_t = 1)]
	pub grains_per_frame: Cell,

	/// Toppling passes per frame
	#[arg(long, default_value_t = 1)]
	pub passes_per_frame: u64,

	/// Write every frame as a PNG into this directory
	#[arg(long)]
	pub frames: Option<PathBuf>,

	/// Print the pile, one digit per cell (default when no other output is chosen)
	#[arg(long)]
	pub ascii: bool,

	/// Write the pile as CSV [default file: 2_<power>_<pattern>.csv]
	#[arg(long, num_args = 0..=1)]
	pub csv: Option<Option<PathBuf>>,

	/// Write the pile as a PNG
	#[arg(long)]
	pub png: Option<PathBuf>,

	/// Print toppling statistics
	#[arg(long)]
	pub stats: bool,

	/// List the available patterns and exit
	#[arg(long)]
	pub list_patterns: bool,
}

pub fn run() -> ExitCode {
	let cli = Cli::parse();
	let registry = PatternRegistry::standard();
	if cli.list_patterns {
		for p in registry.iter() {
			println!("{}", p);
		}
		return ExitCode::from(EXIT_SUCCESS);
	}
	match execute(&cli, &registry) {
		Ok(()) => ExitCode::from(EXIT_SUCCESS),
		Err(e @ Error::UnknownPattern { .. }) | Err(e @ Error::SandPowerTooLarge { .. }) => {
			eprintln!("Error: {}", e);
			ExitCode::from(EXIT_INVALID_ARGS)
		},
		Err(e) => {
			eprintln!("Error: {}", e);
			ExitCode::from(EXIT_ERROR)
		},
	}
}

fn config(cli: &Cli) -> Result<Config, Error> {
	let mut config = match &cli.config {
		Some(path) => Config::load(path)?,
		None => Config::default(),
	};
	if let Some(power) = cli.sand_power {
		config.sand_power = power;
	}
	if let Some(pattern) = &cli.pattern {
		config.pattern = pattern.clone();
	}
	config.for_animation |= cli.animate;
	Ok(config)
}

fn execute(cli: &Cli, registry: &PatternRegistry) -> Result<(), Error> {
	let config = config(cli)?;
	let mut heap = SandHeap::new(&config, registry)?;
	let start = Instant::now();
	let pile = if config.for_animation {
		animate(cli, &mut heap)?
	} else {
		heap.stabilize()?
	};
	let elapsed = start.elapsed();
	info!("toppled in {:.3?}", elapsed);
	let threshold = heap.pattern().threshold();

	if cli.ascii || (cli.csv.is_none() && cli.png.is_none()) {
		print!("{}", render_ascii(&pile));
	}
	if let Some(path) = &cli.csv {
		let path = path.clone()
			.unwrap_or_else(|| PathBuf::from(csv_file_name(config.sand_power, &config.pattern)));
		save_csv(&pile, &path)?;
		info!("wrote {}", path.display());
	}
	if let Some(path) = &cli.png {
		png(&pile, threshold, path)?;
		info!("wrote {}", path.display());
	}
	if cli.stats {
		let report = heap.report();
		println!("Passes: {}", report.passes);
		println!("Topplings: {}", report.topples);
		println!("Grains moved: {}", report.grains_moved);
		println!("Discarded: {}", report.discarded);
		println!("Remaining: {}", heap.grid().total());
		println!("Elapsed: {:.3} ms", elapsed.as_secs_f64() * 1000.0);
	}
	Ok(())
}

fn frame_path(dir: &Path, n: usize) -> PathBuf {
	dir.join(format!("frame_{:05}.png", n))
}

fn animate(cli: &Cli, heap: &mut SandHeap) -> Result<Grid, Error> {
	if let Some(dir) = &cli.frames {
		fs::create_dir_all(dir)?;
	}
	let threshold = heap.pattern().threshold();
	let mut count = 0;
	for (n, frame) in heap.frames(cli.grains_per_frame, cli.passes_per_frame).enumerate() {
		let frame = frame?;
		if let Some(dir) = &cli.frames {
			png(&frame, threshold, &frame_path(dir, n))?;
		}
		count = n + 1;
	}
	info!("{} frames", count);
	trim(heap.grid())
}
