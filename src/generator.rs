//! Maze generation module.
//!
//! This module carves perfect mazes with a randomized depth-first walk over a lattice of rooms,
//! then picks an exit far from the start and scatters keys, traps and coins over the remaining
//! floor.

use std::collections::BTreeSet;

use log::debug;
use rand::{seq::SliceRandom as _, Rng};

use crate::{
    error::{MazeError, Result},
    grid::{CellKind, Grid, Pos},
    types::{Difficulty, Direction, ItemCounts},
};

/// Room the carving walk starts from, which is also where the player spawns.
pub const START: Pos = Pos::new(1, 1);

/// Smallest width and height able to hold a room surrounded by walls.
pub const MIN_DIMENSION: usize = 3;

/// Largest width and height the core accepts.
///
/// This keeps the grid allocation and the cost of carving and searching bounded, far above the
/// sizes the interface offers.
pub const MAX_DIMENSION: usize = 1024;

/// Checks that a maze of the given size can be built.
///
/// # Errors
///
/// - [`MazeError::InvalidDimensions`] if either side falls outside
///   [`MIN_DIMENSION`]`..=`[`MAX_DIMENSION`].
pub const fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width < MIN_DIMENSION
        || height < MIN_DIMENSION
        || width > MAX_DIMENSION
        || height > MAX_DIMENSION
    {
        return Err(MazeError::InvalidDimensions { width, height });
    }

    Ok(())
}

/// A freshly generated maze with its item registries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    /// Cell contents, with items and the exit already marked.
    pub grid: Grid,
    /// Player spawn position, left as open floor in the grid.
    pub start: Pos,
    /// Exit position.
    pub exit: Pos,
    /// Positions holding a key.
    pub keys: BTreeSet<Pos>,
    /// Positions holding a trap.
    pub traps: BTreeSet<Pos>,
    /// Positions holding a coin.
    pub coins: BTreeSet<Pos>,
    /// Keys needed to open the exit, as configured by the difficulty profile.
    pub required_keys: usize,
}

/// Randomized maze generator.
///
/// The generator owns its random source so tests can hand it a seeded one and get the same maze
/// on every run. Every call to [`MazeGenerator::generate`] keeps drawing from the same source, so
/// consecutive mazes differ.
#[derive(Debug)]
pub struct MazeGenerator<R> {
    /// Source of every random choice made while generating.
    rng: R,
}

impl<R: Rng> MazeGenerator<R> {
    /// Wraps a random source into a generator.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generates a maze of the given size with items placed for the given difficulty.
    ///
    /// This function carves the maze, chooses the exit among the cells far enough from the start,
    /// places the items on the remaining floor and finally marks the exit. Running short of floor
    /// for items or of far-away exit candidates is handled by the documented fallbacks and never
    /// fails.
    ///
    /// # Errors
    ///
    /// - [`MazeError::InvalidDimensions`] if either side falls outside
    ///   [`MIN_DIMENSION`]`..=`[`MAX_DIMENSION`].
    pub fn generate(&mut self, width: usize, height: usize, difficulty: Difficulty) -> Result<Maze> {
        check_dimensions(width, height)?;

        let mut grid = Grid::filled(width, height, CellKind::Wall);
        let rooms = self.carve(&mut grid)?;
        let exit = self.pick_exit(&grid);
        let counts = difficulty.item_counts(width, height);
        let Items { keys, traps, coins } = self.place_items(&mut grid, exit, counts)?;
        grid.set(exit, CellKind::Exit)?;

        debug!(
            "generated {width}x{height} maze: {rooms} rooms, exit at {exit}, {} keys, {} traps, {} coins",
            keys.len(),
            traps.len(),
            coins.len()
        );

        Ok(Maze {
            grid,
            start: START,
            exit,
            keys,
            traps,
            coins,
            required_keys: counts.required_keys,
        })
    }

    /// Carves the maze in place and returns the number of rooms visited.
    ///
    /// The walk keeps a backtracking stack of rooms. At every step it looks at the rooms two cells
    /// away from the top of the stack in a freshly shuffled order, opens the first one that is
    /// still walled in together with the cell in between, and pushes it. When no such room is
    /// left, the top of the stack is popped. Each room is opened exactly once and joined to
    /// exactly one earlier room, which yields a spanning tree over the rooms.
    fn carve(&mut self, grid: &mut Grid) -> Result<usize> {
        grid.set(START, CellKind::Open)?;
        let mut stack = vec![START];
        let mut directions = Direction::ALL;
        let mut rooms = 1;

        while let Some(&current) = stack.last() {
            directions.shuffle(&mut self.rng);

            let next = directions.iter().find_map(|&direction| {
                let between = current.step(direction)?;
                let neighbor = current.offset(direction, 2)?;
                let walled = grid.in_bounds(neighbor)
                    && !grid.is_border(neighbor)
                    && grid.get(neighbor).ok()? == CellKind::Wall;

                walled.then_some((between, neighbor))
            });

            if let Some((between, neighbor)) = next {
                grid.set(between, CellKind::Open)?;
                grid.set(neighbor, CellKind::Open)?;
                stack.push(neighbor);
                rooms += 1;
            } else {
                let _ = stack.pop();
            }
        }

        Ok(rooms)
    }

    /// Chooses the exit position on a freshly carved grid.
    ///
    /// Candidates are the open cells whose Manhattan distance from the start exceeds a third of
    /// `width + height`, drawn uniformly. Without candidates, the open cell farthest from the start
    /// is used, and on a grid with no floor besides the start the bottom-right interior corner.
    fn pick_exit(&mut self, grid: &Grid) -> Pos {
        let threshold = (grid.width() + grid.height()) / 3;
        let floor: Vec<Pos> = grid
            .positions_of(CellKind::Open)
            .filter(|pos| *pos != START)
            .collect();
        let candidates: Vec<Pos> = floor
            .iter()
            .copied()
            .filter(|pos| pos.manhattan(START) > threshold)
            .collect();

        if let Some(exit) = candidates.choose(&mut self.rng) {
            return *exit;
        }

        debug!("no exit candidate farther than {threshold} cells, using the farthest floor cell");
        floor
            .iter()
            .copied()
            .max_by_key(|pos| pos.manhattan(START))
            .unwrap_or_else(|| Pos::new(grid.height() - 2, grid.width() - 2))
    }

    /// Scatters keys, traps and coins over the open cells other than the start and the exit.
    ///
    /// The floor is shuffled once and split into consecutive slices for each item kind, so no
    /// two items can share a cell. When the floor runs out, the remaining items are dropped.
    fn place_items(&mut self, grid: &mut Grid, exit: Pos, counts: ItemCounts) -> Result<Items> {
        let mut floor: Vec<Pos> = grid
            .positions_of(CellKind::Open)
            .filter(|pos| *pos != START && *pos != exit)
            .collect();
        floor.shuffle(&mut self.rng);

        let requested = counts.required_keys + counts.traps + counts.coins;
        if floor.len() < requested {
            debug!(
                "only {} floor cells for {requested} items, placing as many as fit",
                floor.len()
            );
        }

        let mut floor = floor.into_iter();
        let keys: BTreeSet<Pos> = floor.by_ref().take(counts.required_keys).collect();
        let traps: BTreeSet<Pos> = floor.by_ref().take(counts.traps).collect();
        let coins: BTreeSet<Pos> = floor.take(counts.coins).collect();

        for (registry, kind) in [
            (&keys, CellKind::Key),
            (&traps, CellKind::Trap),
            (&coins, CellKind::Coin),
        ] {
            for pos in registry {
                grid.set(*pos, kind)?;
            }
        }

        Ok(Items { keys, traps, coins })
    }
}

/// Item registries produced by a single placement pass.
struct Items {
    /// Positions holding a key.
    keys: BTreeSet<Pos>,
    /// Positions holding a trap.
    traps: BTreeSet<Pos>,
    /// Positions holding a coin.
    coins: BTreeSet<Pos>,
}
