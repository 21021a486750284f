//! Abelian sandpiles on a fixed square grid.
//!
//! A pile of `2^sand_power` grains is dropped on the centre of a grid and
//! toppled according to a named [`Pattern`]: any cell holding at least
//! `threshold` grains sends `v / threshold` grains along each of the
//! pattern's offsets, keeping the remainder. Grains sent past the border
//! are lost. Once nothing topples, the pile is trimmed to its bounding box.
//!
//! ```
//! use sandheap::{Config, PatternRegistry, SandHeap};
//!
//! let registry = PatternRegistry::standard();
//! let mut heap = SandHeap::new(&Config::new(2, "+"), &registry).unwrap();
//! let pile = heap.stabilize().unwrap();
//! assert_eq!(pile, vec![vec![0, 1, 0], vec![1, 0, 1], vec![0, 1, 0]]);
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod heap;
pub mod output;
pub mod pattern;
pub mod step;
pub mod topple;
pub mod trim;

pub use config::Config;
pub use error::{Error, Result};
pub use grid::GridStore;
pub use heap::SandHeap;
pub use pattern::{Offset, Pattern, PatternRegistry};
pub use step::{Frames, StepDriver};
pub use topple::{State, ToppleEngine, ToppleReport};
pub use trim::{trim, trim_rows};

/// Grains on one cell.
pub type Cell = u64;

/// A row-major array of cells, as handed to callers.
pub type Grid = Vec<Vec<Cell>>;
