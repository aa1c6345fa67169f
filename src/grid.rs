use std::fmt;

use error_chain::bail;

use crate::cells::{Cell, CompassPrimary, Position};
use crate::errors::*;
use crate::units::{Height, Width};

/// Rectangular, row-major grid of cells.
///
/// A cell's wall towards a neighbour and the neighbour's wall back are separate flags; use
/// `carve` to keep both sides consistent.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: width: {:?}, height: {:?}, passages: {:?}",
               self.width, self.height, self.passages_count())
    }
}

impl Grid {
    /// Allocate a `width` x `height` grid with every cell cleared.
    ///
    /// Zero sized dimensions are rejected before any allocation.
    pub fn new(width: Width, height: Height) -> Result<Grid> {
        let (Width(w), Height(h)) = (width, height);
        if w == 0 || h == 0 {
            bail!(ErrorKind::InvalidDimension(w, h));
        }
        // Positions are u32 pairs.
        if w > u32::MAX as usize || h > u32::MAX as usize {
            bail!(ErrorKind::Allocation("grid", w.saturating_mul(h)));
        }
        let count = w.checked_mul(h)
                     .ok_or_else(|| Error::from(ErrorKind::Allocation("grid", usize::MAX)))?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(count)
             .map_err(|_| Error::from(ErrorKind::Allocation("grid", count)))?;
        cells.resize(count, Cell::cleared());

        Ok(Grid {
            cells,
            width: w,
            height: h,
        })
    }

    /// Put every cell back to all walls standing and unvisited.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::cleared();
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Where the maze is entered, through its north wall.
    #[inline]
    pub fn entrance(&self) -> Position {
        Position::new(0, 0)
    }

    /// Where the maze is left, through its south wall.
    #[inline]
    pub fn exit(&self) -> Position {
        Position::new((self.width - 1) as u32, (self.height - 1) as u32)
    }

    /// Is the position within the grid's dimensions
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Panics if the position is outside the grid.
    #[inline]
    pub fn cell_at(&self, pos: Position) -> &Cell {
        let index = self.index(pos);
        &self.cells[index]
    }

    /// Panics if the position is outside the grid.
    #[inline]
    pub fn cell_at_mut(&mut self, pos: Position) -> &mut Cell {
        let index = self.index(pos);
        &mut self.cells[index]
    }

    #[inline]
    pub fn open_wall(&mut self, pos: Position, dir: CompassPrimary) {
        self.cell_at_mut(pos).walls.remove(dir);
    }

    #[inline]
    pub fn close_wall(&mut self, pos: Position, dir: CompassPrimary) {
        self.cell_at_mut(pos).walls.insert(dir);
    }

    #[inline]
    pub fn is_visited(&self, pos: Position) -> bool {
        self.cell_at(pos).visited
    }

    #[inline]
    pub fn mark_visited(&mut self, pos: Position) {
        self.cell_at_mut(pos).visited = true;
    }

    /// The neighbouring position in `dir`, if it lies inside the grid.
    pub fn neighbour(&self, pos: Position, dir: CompassPrimary) -> Option<Position> {
        pos.offset(dir).filter(|neighbour| self.contains(*neighbour))
    }

    /// Open a passage from `pos` towards `dir`, removing the wall on both sides.
    ///
    /// Returns the neighbour joined to, or None (and no change) if there is no neighbour that way.
    pub fn carve(&mut self, pos: Position, dir: CompassPrimary) -> Option<Position> {
        let neighbour = self.neighbour(pos, dir)?;
        self.open_wall(pos, dir);
        self.open_wall(neighbour, dir.opposite());
        Some(neighbour)
    }

    /// Is there an open passage to the neighbour in `dir`. Both cells must agree.
    pub fn is_passage(&self, pos: Position, dir: CompassPrimary) -> bool {
        self.neighbour(pos, dir).map_or(false, |neighbour| {
            !self.cell_at(pos).walls.contains(dir) &&
            !self.cell_at(neighbour).walls.contains(dir.opposite())
        })
    }

    /// Number of open passages between adjacent cells. Boundary openings are not counted.
    pub fn passages_count(&self) -> usize {
        self.iter()
            .map(|pos| {
                [CompassPrimary::South, CompassPrimary::East]
                    .iter()
                    .filter(|dir| self.is_passage(pos, **dir))
                    .count()
            })
            .sum()
    }

    /// All positions in row-major order.
    pub fn iter(&self) -> GridIter {
        GridIter {
            width: self.width,
            current_cell_number: 0,
            cells_count: self.cells.len(),
        }
    }

    #[inline]
    fn index(&self, pos: Position) -> usize {
        assert!(self.contains(pos),
                "position {:?} outside {}x{} grid", pos, self.width, self.height);
        pos.y as usize * self.width + pos.x as usize
    }
}

#[derive(Debug, Clone)]
pub struct GridIter {
    width: usize,
    current_cell_number: usize,
    cells_count: usize,
}

impl Iterator for GridIter {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let x = self.current_cell_number % self.width;
            let y = self.current_cell_number / self.width;
            self.current_cell_number += 1;
            Some(Position::new(x as u32, y as u32))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for GridIter {} // default impl using size_hint()

#[cfg(test)]
mod tests {

    use itertools::Itertools;

    use super::*;
    use crate::cells::Walls;

    fn small_grid(w: usize, h: usize) -> Grid {
        Grid::new(Width(w), Height(h)).expect("grid allocation failed")
    }

    #[test]
    fn zero_dimensions_rejected() {
        for &(w, h) in &[(0, 0), (0, 5), (5, 0)] {
            match Grid::new(Width(w), Height(h)) {
                Err(Error(ErrorKind::InvalidDimension(ew, eh), _)) => assert_eq!((ew, eh), (w, h)),
                other => panic!("expected invalid dimension error, got {:?}", other),
            }
        }
    }

    #[test]
    fn overflowing_dimensions_rejected() {
        let result = Grid::new(Width(u32::MAX as usize), Height(u32::MAX as usize));
        match result {
            Err(Error(ErrorKind::Allocation(..), _)) => {}
            other => panic!("expected allocation error, got {:?}", other),
        }
    }

    #[test]
    fn new_grid_is_cleared() {
        let g = small_grid(3, 2);
        assert_eq!(g.size(), 6);
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 2);
        for pos in g.iter() {
            assert_eq!(*g.cell_at(pos), Cell::cleared());
        }
        assert_eq!(g.passages_count(), 0);
    }

    #[test]
    fn neighbour_cells() {
        let g = small_grid(10, 10);

        let check_expected_neighbours = |pos, expected_neighbours: &[Position]| {
            let neighbours: Vec<Position> = CompassPrimary::ALL.iter()
                .filter_map(|dir| g.neighbour(pos, *dir))
                .sorted()
                .collect();
            let expected: Vec<Position> = expected_neighbours.iter().cloned().sorted().collect();
            assert_eq!(neighbours, expected);
        };
        let gc = |x, y| Position::new(x, y);

        // corners
        check_expected_neighbours(gc(0, 0), &[gc(1, 0), gc(0, 1)]);
        check_expected_neighbours(gc(9, 0), &[gc(8, 0), gc(9, 1)]);
        check_expected_neighbours(gc(0, 9), &[gc(0, 8), gc(1, 9)]);
        check_expected_neighbours(gc(9, 9), &[gc(9, 8), gc(8, 9)]);

        // side element examples
        check_expected_neighbours(gc(1, 0), &[gc(0, 0), gc(1, 1), gc(2, 0)]);
        check_expected_neighbours(gc(0, 8), &[gc(1, 8), gc(0, 7), gc(0, 9)]);

        // Some place with 4 neighbours inside the grid
        check_expected_neighbours(gc(1, 1), &[gc(0, 1), gc(1, 0), gc(2, 1), gc(1, 2)]);
    }

    #[test]
    fn neighbour_at_dir() {
        let g = small_grid(2, 2);
        let gc = |x, y| Position::new(x, y);
        let check_neighbour = |pos, dir: CompassPrimary, expected| {
            assert_eq!(g.neighbour(pos, dir), expected);
        };
        check_neighbour(gc(0, 0), CompassPrimary::North, None);
        check_neighbour(gc(0, 0), CompassPrimary::South, Some(gc(0, 1)));
        check_neighbour(gc(0, 0), CompassPrimary::East, Some(gc(1, 0)));
        check_neighbour(gc(0, 0), CompassPrimary::West, None);

        check_neighbour(gc(1, 1), CompassPrimary::North, Some(gc(1, 0)));
        check_neighbour(gc(1, 1), CompassPrimary::South, None);
        check_neighbour(gc(1, 1), CompassPrimary::East, None);
        check_neighbour(gc(1, 1), CompassPrimary::West, Some(gc(0, 1)));
    }

    #[test]
    fn cell_iter() {
        let g = small_grid(2, 2);
        assert_eq!(g.iter().len(), 4);
        assert_eq!(g.iter().collect::<Vec<Position>>(),
                   &[Position::new(0, 0),
                     Position::new(1, 0),
                     Position::new(0, 1),
                     Position::new(1, 1)]);
    }

    #[test]
    fn open_and_close_touch_one_cell() {
        let mut g = small_grid(2, 1);
        let a = Position::new(0, 0);
        let b = Position::new(1, 0);

        g.open_wall(a, CompassPrimary::East);
        assert!(!g.cell_at(a).walls.contains(CompassPrimary::East));
        assert_eq!(g.cell_at(b).walls, Walls::ALL);
        // One sided, so not a passage yet
        assert!(!g.is_passage(a, CompassPrimary::East));

        g.close_wall(a, CompassPrimary::East);
        assert_eq!(g.cell_at(a).walls, Walls::ALL);
    }

    #[test]
    fn carving_is_two_sided() {
        let mut g = small_grid(3, 3);
        let gc = |x, y| Position::new(x, y);

        assert_eq!(g.carve(gc(1, 1), CompassPrimary::North), Some(gc(1, 0)));
        assert!(g.is_passage(gc(1, 1), CompassPrimary::North));
        assert!(g.is_passage(gc(1, 0), CompassPrimary::South));
        assert_eq!(g.passages_count(), 1);

        assert_eq!(g.carve(gc(1, 1), CompassPrimary::East), Some(gc(2, 1)));
        assert!(g.is_passage(gc(2, 1), CompassPrimary::West));
        assert_eq!(g.passages_count(), 2);

        // No neighbour beyond the boundary, nothing changes
        assert_eq!(g.carve(gc(0, 0), CompassPrimary::West), None);
        assert!(g.cell_at(gc(0, 0)).walls.contains(CompassPrimary::West));
        assert_eq!(g.passages_count(), 2);
    }

    #[test]
    fn boundary_openings_are_not_passages() {
        let mut g = small_grid(2, 2);
        let entrance = g.entrance();
        g.open_wall(entrance, CompassPrimary::North);
        assert!(!g.is_passage(entrance, CompassPrimary::North));
        assert_eq!(g.passages_count(), 0);
    }

    #[test]
    fn reset_clears_everything() {
        let mut g = small_grid(3, 3);
        let centre = Position::new(1, 1);
        g.carve(centre, CompassPrimary::South);
        g.mark_visited(centre);
        assert!(g.is_visited(centre));

        g.reset();
        assert!(!g.is_visited(centre));
        assert_eq!(g.passages_count(), 0);
        assert_eq!(g, small_grid(3, 3));
    }

    #[test]
    fn entrance_and_exit() {
        let g = small_grid(4, 7);
        assert_eq!(g.entrance(), Position::new(0, 0));
        assert_eq!(g.exit(), Position::new(3, 6));

        let single = small_grid(1, 1);
        assert_eq!(single.entrance(), single.exit());
    }

    #[test]
    #[should_panic]
    fn out_of_range_access_panics() {
        let g = small_grid(2, 2);
        let _ = g.cell_at(Position::new(2, 0));
    }
}
