//! Pathfinding algorithm module.
//!
//! This module contains the breadth-first search used to compute the shortest walk between two
//! cells of a grid, which backs the in-game hint.

use std::collections::{HashMap, VecDeque};

use crate::{
    grid::{Grid, Pos},
    types::Direction,
};

/// Finds the shortest walk from `source` to `target` over the non-wall cells of `grid`.
///
/// This function performs a breadth-first search over the four cardinal neighbours of each cell,
/// expanded in the fixed up, right, down, left order so ties always resolve the same way. Every
/// cell other than a wall is walkable: keys, traps and coins neither block nor alter the search.
/// Each cell is visited at most once and the search stops as soon as the target leaves the queue.
///
/// The returned walk **excludes `source`** and ends with `target`, so its first element is the
/// next cell to step on. A search from a cell to itself therefore returns an empty walk. [`None`]
/// is returned when the target cannot be reached or either end lies outside the grid.
#[must_use]
pub fn shortest_path(grid: &Grid, source: Pos, target: Pos) -> Option<Vec<Pos>> {
    if !grid.in_bounds(source) || !grid.in_bounds(target) {
        return None;
    }

    let mut parents: HashMap<Pos, Pos> = HashMap::new();
    let mut queue = VecDeque::from([source]);
    let _ = parents.insert(source, source);

    while let Some(current) = queue.pop_front() {
        if current == target {
            break;
        }

        for direction in Direction::ALL {
            let Some(next) = current.step(direction) else {
                continue;
            };

            // Walls and cells outside the grid are never entered
            if !matches!(grid.is_passable(next), Ok(true)) || parents.contains_key(&next) {
                continue;
            }

            let _ = parents.insert(next, current);
            queue.push_back(next);
        }
    }

    if !parents.contains_key(&target) {
        return None;
    }

    let mut path = Vec::new();
    let mut current = target;
    while current != source {
        path.push(current);
        current = *parents.get(&current)?;
    }
    path.reverse();

    Some(path)
}
