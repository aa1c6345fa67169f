use std::fmt;

use crate::cells::{CompassPrimary, Position};
use crate::grid::Grid;

const WALL_L: &str = "╴";
const WALL_R: &str = "╶";
const WALL_U: &str = "╵";
const WALL_D: &str = "╷";
const WALL_LR_3: &str = "───";
const WALL_LR: &str = "─";
const WALL_UD: &str = "│";
const WALL_LD: &str = "┐";
const WALL_RU: &str = "└";
const WALL_LU: &str = "┘";
const WALL_RD: &str = "┌";
const WALL_LRU: &str = "┴";
const WALL_LRD: &str = "┬";
const WALL_LRUD: &str = "┼";
const WALL_RUD: &str = "├";
const WALL_LUD: &str = "┤";
const CELL_BODY: &str = "   ";

impl Grid {
    /// Does a wall stand on the `dir` side of `pos`.
    ///
    /// Between two cells that means there is no passage; on the grid boundary it is the cell's
    /// own flag, so the entrance and exit openings show.
    fn wall_stands(&self, pos: Position, dir: CompassPrimary) -> bool {
        match self.neighbour(pos, dir) {
            Some(_) => !self.is_passage(pos, dir),
            None => self.cell_at(pos).walls.contains(dir),
        }
    }
}

/// Box drawing glyph joining whichever wall sections meet at a corner.
fn corner(left: bool, right: bool, up: bool, down: bool) -> &'static str {
    match (left, right, up, down) {
        (true, true, true, true) => WALL_LRUD,
        (true, true, true, false) => WALL_LRU,
        (true, true, false, true) => WALL_LRD,
        (true, false, true, true) => WALL_LUD,
        (false, true, true, true) => WALL_RUD,
        (true, true, false, false) => WALL_LR,
        (false, false, true, true) => WALL_UD,
        (false, true, true, false) => WALL_RU,
        (true, false, false, true) => WALL_LD,
        (true, false, true, false) => WALL_LU,
        (false, true, false, true) => WALL_RD,
        (true, false, false, false) => WALL_L,
        (false, true, false, false) => WALL_R,
        (false, false, true, false) => WALL_U,
        (false, false, false, true) => WALL_D,
        _ => " ",
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (columns_count, rows_count) = (self.width(), self.height());

        // Positions off the grid have no walls at all.
        let stands = |x: usize, y: usize, dir: CompassPrimary| {
            x < columns_count && y < rows_count &&
            self.wall_stands(Position::new(x as u32, y as u32), dir)
        };

        // Start by special case rendering the text for the north most boundary
        let mut output = String::from(corner(false,
                                             stands(0, 0, CompassPrimary::North),
                                             false,
                                             stands(0, 0, CompassPrimary::West)));
        for x in 0..columns_count {
            let north = stands(x, 0, CompassPrimary::North);
            output.push_str(if north { WALL_LR_3 } else { CELL_BODY });
            output.push_str(corner(north,
                                   stands(x + 1, 0, CompassPrimary::North),
                                   false,
                                   stands(x, 0, CompassPrimary::East)));
        }
        output.push('\n');

        for y in 0..rows_count {

            // Each cell uses the southern wall of the cell above it as its own northern wall, so
            // a row only renders the cell body, its eastern boundary and its southern boundary.
            // The west most boundary of the row is special cased.
            let mut row_middle_section_render =
                String::from(if stands(0, y, CompassPrimary::West) { WALL_UD } else { " " });
            let mut row_bottom_section_render =
                String::from(corner(false,
                                    stands(0, y, CompassPrimary::South),
                                    stands(0, y, CompassPrimary::West),
                                    stands(0, y + 1, CompassPrimary::West)));

            for x in 0..columns_count {
                let east = stands(x, y, CompassPrimary::East);
                let south = stands(x, y, CompassPrimary::South);

                row_middle_section_render.push_str(CELL_BODY);
                row_middle_section_render.push_str(if east { WALL_UD } else { " " });

                row_bottom_section_render.push_str(if south { WALL_LR_3 } else { CELL_BODY });
                row_bottom_section_render.push_str(corner(south,
                                                          stands(x + 1, y, CompassPrimary::South),
                                                          east,
                                                          stands(x, y + 1, CompassPrimary::East)));
            }

            output.push_str(&row_middle_section_render);
            output.push('\n');
            output.push_str(&row_bottom_section_render);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::units::{Height, Width};

    fn lines(grid: &Grid) -> Vec<String> {
        grid.to_string().lines().map(String::from).collect()
    }

    #[test]
    fn closed_single_cell() {
        let grid = Grid::new(Width(1), Height(1)).unwrap();
        assert_eq!(lines(&grid), vec!["┌───┐", "│   │", "└───┘"]);
    }

    #[test]
    fn entrance_and_exit_gaps() {
        let mut grid = Grid::new(Width(2), Height(1)).unwrap();
        grid.carve(Position::new(0, 0), CompassPrimary::East);
        let (entrance, exit) = (grid.entrance(), grid.exit());
        grid.open_wall(entrance, CompassPrimary::North);
        grid.open_wall(exit, CompassPrimary::South);

        assert_eq!(lines(&grid), vec!["╷   ╶───┐", "│       │", "└───╴   ╵"]);
    }

    #[test]
    fn internal_walls_join_up() {
        let mut grid = Grid::new(Width(2), Height(2)).unwrap();
        let gc = |x, y| Position::new(x, y);
        grid.carve(gc(0, 0), CompassPrimary::East);
        grid.carve(gc(0, 0), CompassPrimary::South);
        grid.carve(gc(0, 1), CompassPrimary::East);

        let expected = ["┌───────┐", "│       │", "│   ╶───┤", "│       │", "└───────┘"];
        assert_eq!(lines(&grid), expected.iter().map(|s| s.to_string()).collect_vec());
    }

    #[test]
    fn every_row_has_the_same_width() {
        let mut grid = Grid::new(Width(5), Height(3)).unwrap();
        grid.carve(Position::new(2, 1), CompassPrimary::North);
        let widths = lines(&grid).iter().map(|l| l.chars().count()).unique().collect_vec();
        assert_eq!(widths, vec![1 + 5 * 4]);
    }
}
