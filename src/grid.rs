use error_chain::bail;
use rand::Rng;
use smallvec::SmallVec;
use std::fmt;
use std::iter;

use crate::cells::{Cartesian2DCoordinate, Cell, CompassPrimary};
use crate::errors::*;
use crate::grid_iterators::{CellIter, RowIter};
use crate::units::{EdgesCount, Height, NodesCount, Width};

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

/// A fixed size rectangular grid of maze cells, stored row major.
///
/// The top left cell always has an outward passage North (the entrance) and the bottom right
/// cell always has one South (the exit). Every other passage is carved in mirrored pairs.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    width: Width,
    height: Height,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: width: {:?}, height: {:?}, links: {:?}",
               self.width, self.height, self.links_count())
    }
}

impl Grid {
    pub fn new(width: Width, height: Height) -> Result<Grid> {
        let (Width(w), Height(h)) = (width, height);
        // coordinates are u32 on each axis
        if w == 0 || h == 0 || u32::try_from(w).is_err() || u32::try_from(h).is_err() {
            bail!(ErrorKind::InvalidDimensions(w, h));
        }
        let cells_count = w.checked_mul(h)
            .ok_or(ErrorKind::InvalidDimensions(w, h))?;

        let mut grid = Grid {
            cells: iter::repeat(Cell::new()).take(cells_count).collect(),
            width,
            height,
        };

        let entrance = grid.entrance();
        let exit = grid.exit();
        grid.cell_mut(entrance).set_passage(CompassPrimary::North);
        grid.cell_mut(exit).set_passage(CompassPrimary::South);

        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Node count and the edge count of a spanning tree over those nodes.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let cells_count = self.size();
        (NodesCount(cells_count), EdgesCount(cells_count - 1))
    }

    /// The maze entrance, open to the outside on its North side.
    #[inline]
    pub fn entrance(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(0, 0)
    }

    /// The maze exit, open to the outside on its South side.
    #[inline]
    pub fn exit(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(self.width.0 as u32 - 1, self.height.0 as u32 - 1)
    }

    #[inline]
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cartesian2DCoordinate {
        let index = rng.gen_range(0..self.size());
        Cartesian2DCoordinate::from_row_major_index(index, self.width)
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.width.0 + coord.x as usize)
        } else {
            None
        }
    }

    pub fn cell(&self, coord: Cartesian2DCoordinate) -> Option<&Cell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    // Only for coordinates already known to be valid.
    fn cell_mut(&mut self, coord: Cartesian2DCoordinate) -> &mut Cell {
        let index = coord.y as usize * self.width.0 + coord.x as usize;
        &mut self.cells[index]
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        let (x, y) = (coord.x, coord.y);
        let neighbour_coord_opt = match direction {
            CompassPrimary::North => y.checked_sub(1).map(|ny| Cartesian2DCoordinate::new(x, ny)),
            CompassPrimary::South => y.checked_add(1).map(|ny| Cartesian2DCoordinate::new(x, ny)),
            CompassPrimary::East => x.checked_add(1).map(|nx| Cartesian2DCoordinate::new(nx, y)),
            CompassPrimary::West => x.checked_sub(1).map(|nx| Cartesian2DCoordinate::new(nx, y)),
        };

        neighbour_coord_opt.filter(|neighbour_coord| {
            self.is_valid_coordinate(coord) && self.is_valid_coordinate(*neighbour_coord)
        })
    }

    /// Cells that are to the North, South, East or West of a particular cell, but not
    /// necessarily linked by a passage.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL.iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    /// In bounds neighbours that no generator has visited yet, listed West, East, North then South.
    pub fn unvisited_neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        const SEARCH_ORDER: [CompassPrimary; 4] = [CompassPrimary::West,
                                                   CompassPrimary::East,
                                                   CompassPrimary::North,
                                                   CompassPrimary::South];
        SEARCH_ORDER.iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .filter(|neighbour| !self.is_visited(*neighbour))
            .collect()
    }

    /// Which side of `from` faces `to`, if they are adjacent cells of this grid.
    pub fn direction_between(&self,
                             from: Cartesian2DCoordinate,
                             to: Cartesian2DCoordinate)
                             -> Option<CompassPrimary> {
        CompassPrimary::ALL.iter()
            .cloned()
            .find(|dir| self.neighbour_at_direction(from, *dir) == Some(to))
    }

    /// Open a passage between two adjacent cells, setting the mirrored passage bits on both.
    pub fn carve_passage(&mut self,
                         from: Cartesian2DCoordinate,
                         to: Cartesian2DCoordinate)
                         -> Result<()> {
        let direction = self.direction_between(from, to)
            .ok_or(ErrorKind::NotAdjacent(from, to))?;

        self.cell_mut(from).set_passage(direction);
        self.cell_mut(to).set_passage(direction.opposite());
        Ok(())
    }

    /// Does the cell have an opening on the given side, either to a neighbour or to the outside?
    pub fn has_passage(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        self.cell(coord).map_or(false, |cell| cell.has_passage(direction))
    }

    /// Are the cell and its neighbour in the given direction joined by a passage?
    pub fn is_neighbour_linked(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour_coord| {
                self.has_passage(coord, direction) &&
                self.has_passage(neighbour_coord, direction.opposite())
            })
    }

    /// Cells linked to a particular cell by a passage.
    pub fn links(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL.iter()
            .filter(|dir| self.is_neighbour_linked(coord, **dir))
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    #[inline]
    pub fn is_visited(&self, coord: Cartesian2DCoordinate) -> bool {
        self.cell(coord).map_or(false, |cell| cell.is_visited())
    }

    /// Mark a cell visited. Returns false if the coordinate is not on the grid.
    pub fn mark_visited(&mut self, coord: Cartesian2DCoordinate) -> bool {
        if self.is_valid_coordinate(coord) {
            self.cell_mut(coord).mark_visited();
            true
        } else {
            false
        }
    }

    /// Number of carved passages between pairs of cells. Outward passages are not counted.
    pub fn links_count(&self) -> usize {
        self.iter_links().count()
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.width, self.height)
    }

    #[inline]
    pub fn iter_row(&self) -> RowIter {
        RowIter::new(self.width, self.height)
    }

    /// Every carved passage once, as `(cell, neighbour)` with the neighbour to the East or South.
    pub fn iter_links(&self) -> impl Iterator<Item = (Cartesian2DCoordinate, Cartesian2DCoordinate)> + '_ {
        self.iter().flat_map(move |coord| {
            [CompassPrimary::East, CompassPrimary::South]
                .into_iter()
                .filter(move |dir| self.is_neighbour_linked(coord, *dir))
                .filter_map(move |dir| self.neighbour_at_direction(coord, dir))
                .map(move |neighbour| (coord, neighbour))
        })
    }
}
