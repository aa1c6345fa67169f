use log::{debug, error};
use rand::Rng;
use smallvec::SmallVec;

use crate::cells::{Axis, CompassPrimary, Position};
use crate::errors::*;
use crate::grid::Grid;
use crate::stack::PositionStack;

/// Per-axis weights for choosing the next carving direction.
///
/// Each candidate direction is entered into the draw once per unit of its axis' weight, so a
/// horizontal weight of 3 against a vertical weight of 1 favours long east-west corridors.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Bias {
    horizontal: usize,
    vertical: usize,
}

impl Bias {
    /// Both weights must be at least 1.
    pub fn new(horizontal: usize, vertical: usize) -> Result<Bias> {
        if horizontal == 0 || vertical == 0 {
            return Err(ErrorKind::InvalidBias(horizontal, vertical).into());
        }
        Ok(Bias {
            horizontal,
            vertical,
        })
    }

    #[inline]
    pub fn horizontal(&self) -> usize {
        self.horizontal
    }

    #[inline]
    pub fn vertical(&self) -> usize {
        self.vertical
    }

    #[inline]
    pub fn weight(&self, dir: CompassPrimary) -> usize {
        match dir.axis() {
            Axis::Vertical => self.vertical,
            Axis::Horizontal => self.horizontal,
        }
    }
}

impl Default for Bias {
    fn default() -> Bias {
        Bias {
            horizontal: 1,
            vertical: 1,
        }
    }
}

type DirectionSmallVec = SmallVec<[CompassPrimary; 4]>;

/// Apply the recursive backtracker maze generation algorithm to a grid.
///
/// It is a randomised depth first walk. Starting from the centre cell it repeatedly carves a
/// passage into a random unvisited neighbour of the cell on top of the stack. When a cell has
/// no unvisited neighbours left it is dropped from the stack, backtracking to the previous cell
/// on the walk. The walk is driven by `stack`, not by recursion.
///
/// Every cell is visited once and joined by exactly one passage to the cell it was reached
/// from, so the result is a perfect maze (a spanning tree over the grid). Finally the north
/// wall of the entrance and the south wall of the exit are removed.
///
/// The grid is cleared first, so any previous maze is discarded. `stack` must be able to hold
/// one entry per grid cell.
pub fn recursive_backtracker<R>(grid: &mut Grid,
                                stack: &mut PositionStack,
                                bias: &Bias,
                                rng: &mut R)
    where R: Rng + ?Sized
{
    debug_assert!(stack.capacity() >= grid.size(),
                  "stack capacity {} is smaller than the grid size {}",
                  stack.capacity(),
                  grid.size());

    grid.reset();
    stack.clear();

    let start = Position::new((grid.width() / 2) as u32, (grid.height() / 2) as u32);
    grid.mark_visited(start);
    stack.push(start);

    let mut carve_steps = 0usize;
    while let Some(current) = stack.pop() {

        let candidates = unvisited_directions(grid, current);
        let chosen_dir = match choose_weighted(&candidates, bias, rng) {
            Some(dir) => dir,
            // Dead end, backtrack to whatever is below it on the stack.
            None => continue,
        };

        // The current cell may still have other unvisited neighbours.
        stack.push(current);

        let neighbour = match current.offset(chosen_dir).filter(|pos| grid.contains(*pos)) {
            Some(pos) => pos,
            None => {
                error!("Neighbour of {:?} to the {:?} is outside the {}x{} grid, skipping",
                       current,
                       chosen_dir,
                       grid.width(),
                       grid.height());
                continue;
            }
        };

        grid.open_wall(current, chosen_dir);
        grid.open_wall(neighbour, chosen_dir.opposite());
        grid.mark_visited(neighbour);
        stack.push(neighbour);
        carve_steps += 1;
    }

    let (entrance, exit) = (grid.entrance(), grid.exit());
    grid.open_wall(entrance, CompassPrimary::North);
    grid.open_wall(exit, CompassPrimary::South);

    debug!("Carved {} passages through a {}x{} grid",
           carve_steps,
           grid.width(),
           grid.height());
}

/// The directions from `pos` to in-grid neighbours not yet visited, in North, South, West,
/// East order.
fn unvisited_directions(grid: &Grid, pos: Position) -> DirectionSmallVec {
    CompassPrimary::ALL
        .iter()
        .cloned()
        .filter(|&dir| {
            grid.neighbour(pos, dir).map_or(false, |neighbour| !grid.is_visited(neighbour))
        })
        .collect()
}

/// Pick one entry uniformly from the multiset holding each candidate `bias.weight(dir)` times,
/// with a single draw. `None` when there are no candidates.
fn choose_weighted<R>(candidates: &[CompassPrimary],
                      bias: &Bias,
                      rng: &mut R)
                      -> Option<CompassPrimary>
    where R: Rng + ?Sized
{
    // Four weights of at most usize::MAX each always fit.
    let total: u128 = candidates.iter().map(|&dir| bias.weight(dir) as u128).sum();
    if total == 0 {
        return None;
    }
    weighted_entry(candidates, bias, rng.gen_range(0..total))
}

/// Entry `index` of the weighted multiset, found by walking the candidates in order instead of
/// building the multiset.
fn weighted_entry(candidates: &[CompassPrimary],
                  bias: &Bias,
                  mut index: u128)
                  -> Option<CompassPrimary> {
    for &dir in candidates {
        let weight = bias.weight(dir) as u128;
        if index < weight {
            return Some(dir);
        }
        index -= weight;
    }
    None
}
