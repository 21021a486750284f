//! End-to-end piles built from a config, checked against known shapes.

use sandheap::{
	trim, Config, Error, GridStore, PatternRegistry, SandHeap, State, ToppleEngine,
};

fn heap(power: u32, pattern: &str) -> SandHeap {
	SandHeap::new(&Config::new(power, pattern), &PatternRegistry::standard()).unwrap()
}

fn is_point_symmetric(rows: &[Vec<u64>]) -> bool {
	let h = rows.len();
	(0..h).all(|i| {
		let w = rows[i].len();
		(0..w).all(|j| rows[i][j] == rows[h - 1 - i][w - 1 - j])
	})
}

#[test]
fn four_grains_on_plus() {
	let mut heap = heap(2, "+");
	assert_eq!(heap.grid().side(), 10);
	let pile = heap.stabilize().unwrap();
	assert_eq!(pile, vec![
		vec![0, 1, 0],
		vec![1, 0, 1],
		vec![0, 1, 0],
	]);
	assert_eq!(heap.state(), State::Stable);
	assert_eq!(heap.report().topples, 1);
}

#[test]
fn unknown_pattern_lists_all_nine() {
	let registry = PatternRegistry::standard();
	let err = registry.lookup("zz").unwrap_err();
	match &err {
		Error::UnknownPattern { name, valid } => {
			assert_eq!(name, "zz");
			assert_eq!(valid.len(), 9);
		},
		other => panic!("unexpected {:?}", other),
	}
	let msg = err.to_string();
	assert!(msg.contains("'zz'"));
	for name in registry.names() {
		assert!(msg.contains(name), "{} missing from {}", name, msg);
	}
}

#[test]
fn plus_pile_is_point_symmetric() {
	let mut heap = heap(10, "+");
	let pile = heap.stabilize().unwrap();
	assert!(is_point_symmetric(&heap.grid().to_rows()));
	assert!(is_point_symmetric(&pile));
	assert!(pile.iter().flatten().all(|&v| v < 4));
}

#[test]
fn every_pattern_settles_symmetric() {
	let registry = PatternRegistry::standard();
	for name in registry.names() {
		let mut heap = SandHeap::new(&Config::new(9, name), &registry).unwrap();
		let pile = heap.stabilize().unwrap();
		let threshold = heap.pattern().threshold();
		assert!(pile.iter().flatten().all(|&v| v < threshold), "{} not stable", name);
		assert!(is_point_symmetric(&pile), "{} not symmetric", name);
		assert_eq!(heap.grid().total() + heap.report().discarded, 512, "{} lost track of mass", name);
	}
}

#[test]
fn interior_pile_conserves_mass() {
	let registry = PatternRegistry::standard();
	for name in ["+", "x", "o", "o+"] {
		let mut grid = GridStore::with_centre_mass(65, 1024).unwrap();
		let mut engine = ToppleEngine::new(registry.lookup(name).unwrap().clone());
		let report = engine.settle(&mut grid);
		assert_eq!(report.discarded, 0, "{} reached the border", name);
		assert_eq!(grid.total(), 1024);
		assert_eq!(grid.rows().flatten().sum::<u64>(), 1024);
	}
}

#[test]
fn small_grid_spills_over_border() {
	let registry = PatternRegistry::standard();
	// 121 cells holding at most 15 grains each can't keep 4096.
	let mut grid = GridStore::with_centre_mass(11, 4096).unwrap();
	let mut engine = ToppleEngine::new(registry.lookup("Y").unwrap().clone());
	let report = engine.settle(&mut grid);
	assert!(report.discarded > 0);
	assert!(grid.total() <= 121 * 15);
	assert_eq!(grid.total() + report.discarded, 4096);
	assert!(grid.max() < 16);
}

#[test]
fn stabilizing_twice_changes_nothing() {
	let mut heap = heap(8, "o");
	let first = heap.stabilize().unwrap();
	let report = heap.report();
	let second = heap.stabilize().unwrap();
	assert_eq!(first, second);
	assert_eq!(heap.report(), report);
}

#[test]
fn animated_pile_matches_one_shot() {
	let registry = PatternRegistry::standard();
	let mut one_shot = SandHeap::new(&Config::new(8, "o"), &registry).unwrap();
	let expected = one_shot.stabilize().unwrap();

	let mut animated = SandHeap::new(&Config::new(8, "o").animated(), &registry).unwrap();
	let frames = animated.frames(7, 3).count();
	assert!(frames >= 37);
	assert_eq!(animated.state(), State::Stable);
	assert_eq!(trim(animated.grid()).unwrap(), expected);
}

#[test]
fn stepping_ends_where_stabilize_does() {
	let mut stepped = heap(9, "++");
	let mut passes = 0;
	while stepped.state() != State::Stable {
		stepped.step(5);
		passes += 1;
		assert!(passes < 10_000);
	}
	let mut one_shot = heap(9, "++");
	one_shot.stabilize().unwrap();
	assert_eq!(stepped.grid(), one_shot.grid());
}

#[test]
fn empty_animation_grid_does_not_trim() {
	let heap = SandHeap::new(&Config::new(4, "+").animated(), &PatternRegistry::standard()).unwrap();
	assert!(matches!(trim(heap.grid()), Err(Error::EmptyGrid)));
}
