use std::fmt;

use crate::cells::CompassPrimary;
use crate::grid::Grid;

const CORNER: &str = "+";
const WALL_LR_3: &str = "---";
const WALL_UD: &str = "|";
const OPEN_3: &str = "   ";
const OPEN: &str = " ";

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        // Start by special case rendering the text for the north most boundary.
        // Every later row only draws its own east and south sides, the west most boundary
        // and the north side coming from the row above.
        let mut output = String::from(CORNER);
        if let Some(first_grid_row) = self.iter_row().next() {
            for coord in &first_grid_row {
                let north_open = self.has_passage(*coord, CompassPrimary::North);
                output.push_str(if north_open { OPEN_3 } else { WALL_LR_3 });
                output.push_str(CORNER);
            }
        }
        output.push('\n');

        for row in self.iter_row() {

            let mut row_middle_section_render = String::new();
            let mut row_bottom_section_render = String::from(CORNER);

            if let Some(first) = row.first() {
                let west_open = self.has_passage(*first, CompassPrimary::West);
                row_middle_section_render.push_str(if west_open { OPEN } else { WALL_UD });
            }

            for cell_coord in &row {
                let east_open = self.has_passage(*cell_coord, CompassPrimary::East);
                let south_open = self.has_passage(*cell_coord, CompassPrimary::South);

                row_middle_section_render.push_str(OPEN_3);
                row_middle_section_render.push_str(if east_open { OPEN } else { WALL_UD });

                row_bottom_section_render.push_str(if south_open { OPEN_3 } else { WALL_LR_3 });
                row_bottom_section_render.push_str(CORNER);
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

    use crate::cells::Cartesian2DCoordinate;
    use crate::grid::Grid;
    use crate::units::{Height, Width};

    #[test]
    fn single_cell_text() {
        let g = Grid::new(Width(1), Height(1)).unwrap();
        assert_eq!(g.to_string(), "+   +\n|   |\n+   +\n");
    }

    #[test]
    fn carved_passages_text() {
        let mut g = Grid::new(Width(2), Height(2)).unwrap();
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        g.carve_passage(gc(0, 0), gc(1, 0)).unwrap();
        g.carve_passage(gc(1, 0), gc(1, 1)).unwrap();
        g.carve_passage(gc(1, 1), gc(0, 1)).unwrap();

        let expected = "+   +---+\n\
                        |       |\n\
                        +---+   +\n\
                        |       |\n\
                        +---+   +\n";
        assert_eq!(g.to_string(), expected);
    }
}
