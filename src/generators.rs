use log::debug;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::errors::*;
use crate::grid::Grid;

/// A reproducible random source for maze generation.
pub fn seeded_rng(seed: u64) -> XorShiftRng {
    XorShiftRng::seed_from_u64(seed)
}

/// A random source seeded from the operating system, for when no reproducibility is wanted.
pub fn entropy_rng() -> XorShiftRng {
    XorShiftRng::from_entropy()
}

/// Apply the recursive backtracker maze generation algorithm to a fresh grid.
///
/// Starting from a random cell it performs a random walk that only steps onto unvisited cells,
/// carving a passage with every step. At a dead end it backs up along the walk to the most
/// recent cell that still has an unvisited neighbour and walks on from there.
/// Every carve joins a new cell onto the tree of visited cells so the result is a perfect maze:
/// `size - 1` passages and no loops.
///
/// The walk is held on an explicit stack rather than the call stack, so large grids cannot
/// overflow it. Expects a grid where no cell has been visited yet.
pub fn recursive_backtracker<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Result<()> {

    let start = grid.random_cell(rng);
    grid.mark_visited(start);

    let mut stack = Vec::with_capacity(grid.size());
    stack.push(start);
    let mut carved = 0usize;
    let mut longest_walk = 1usize;

    while let Some(&current) = stack.last() {

        let neighbours = grid.unvisited_neighbours(current);
        if neighbours.is_empty() {
            // dead end, back track
            stack.pop();
            continue;
        }

        let next = neighbours[rng.gen_range(0..neighbours.len())];
        grid.carve_passage(current, next)?;
        grid.mark_visited(next);
        stack.push(next);

        carved += 1;
        longest_walk = longest_walk.max(stack.len());
    }

    debug!("recursive backtracker: {}x{} grid from {:?}, {} passages carved, deepest stack {}",
           grid.width().0,
           grid.height().0,
           start,
           carved,
           longest_walk);

    Ok(())
}
