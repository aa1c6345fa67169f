use log::info;
use rand::Rng;

use crate::errors::*;
use crate::generators::{self, Bias};
use crate::grid::Grid;
use crate::stack::PositionStack;
use crate::units::{Height, Width};

/// Everything one maze needs: the grid and the stack its generation walks with.
///
/// The context is owned by the caller; nothing is shared between contexts, and generating again
/// on the same context starts over from a cleared grid.
#[derive(Debug, Clone)]
pub struct MazeContext {
    grid: Grid,
    stack: PositionStack,
}

impl MazeContext {
    /// Allocate the grid and a stack large enough to hold every cell.
    pub fn new(width: Width, height: Height) -> Result<MazeContext> {
        let grid = Grid::new(width, height).chain_err(|| "Failed to allocate grid.")?;
        let stack = PositionStack::with_capacity(grid.size())
            .chain_err(|| "Failed to initialize position stack.")?;
        Ok(MazeContext { grid, stack })
    }

    /// Carve a new maze into the grid.
    pub fn generate<R>(&mut self, bias: &Bias, rng: &mut R)
        where R: Rng + ?Sized
    {
        info!("Generating {}x{} maze, horizontal:vertical bias {}:{}...",
              self.grid.width(),
              self.grid.height(),
              bias.horizontal(),
              bias.vertical());
        generators::recursive_backtracker(&mut self.grid, &mut self.stack, bias, rng);
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }
}
