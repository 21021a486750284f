//! Run configuration, usually read from a `sandheap.toml`.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::{Cell, Error, Result};

/// Largest `sand_power` whose `2^sand_power` grains fit a cell.
pub const MAX_SAND_POWER: u32 = Cell::BITS - 2;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
	/// The pile starts with `2^sand_power` grains.
	#[serde(default = "default_sand_power")]
	pub sand_power: u32,
	#[serde(default = "default_pattern")]
	pub pattern: String,
	/// Start from an empty grid and let the caller drop the sand in.
	#[serde(default)]
	pub for_animation: bool,
}

fn default_sand_power() -> u32 {
	10
}

fn default_pattern() -> String {
	"+".to_owned()
}

impl Default for Config {
	fn default() -> Self {
		Config {
			sand_power: default_sand_power(),
			pattern: default_pattern(),
			for_animation: false,
		}
	}
}

impl Config {
	pub fn new(sand_power: u32, pattern: &str) -> Config {
		Config {
			sand_power,
			pattern: pattern.to_owned(),
			for_animation: false,
		}
	}

	pub fn animated(mut self) -> Config {
		self.for_animation = true;
		self
	}

	pub fn from_toml_str(s: &str) -> Result<Config> {
		let config: Config = toml::from_str(s)?;
		config.starting_sand()?;
		Ok(config)
	}

	pub fn load(path: &Path) -> Result<Config> {
		Config::from_toml_str(&fs::read_to_string(path)?)
	}

	pub fn starting_sand(&self) -> Result<Cell> {
		if self.sand_power > MAX_SAND_POWER {
			return Err(Error::SandPowerTooLarge {
				power: self.sand_power,
				max: MAX_SAND_POWER,
			});
		}
		Ok(1 << self.sand_power)
	}
}
