use smallvec::SmallVec;

use crate::units::Width;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    /// `index` must lie in a grid whose sides fit in `u32`, which `Grid::new` guarantees.
    pub fn from_row_major_index(index: usize, width: Width) -> Cartesian2DCoordinate {
        let Width(row_length) = width;
        let x = index % row_length;
        let y = index / row_length;

        Cartesian2DCoordinate::new(x as u32, y as u32)
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

/// The four sides of a square cell. North is up the screen (towards row 0) and West is to the left.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::South,
                                          CompassPrimary::West,
                                          CompassPrimary::East];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    /// The bit flagging an open passage on this side of a cell.
    #[inline]
    pub fn bit(self) -> u8 {
        match self {
            CompassPrimary::North => 0b1000,
            CompassPrimary::South => 0b0100,
            CompassPrimary::West => 0b0010,
            CompassPrimary::East => 0b0001,
        }
    }
}

pub type DirectionSmallVec = SmallVec<[CompassPrimary; 4]>;

/// A single maze cell: which of its four sides are open and whether a generator has reached it yet.
///
/// A cleared passage bit is a wall.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct Cell {
    visited: bool,
    passages: u8,
}

impl Cell {
    pub fn new() -> Cell {
        Cell::default()
    }

    #[inline]
    pub fn set_passage(&mut self, direction: CompassPrimary) {
        self.passages |= direction.bit();
    }

    #[inline]
    pub fn has_passage(&self, direction: CompassPrimary) -> bool {
        self.passages & direction.bit() != 0
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    #[inline]
    pub fn mark_visited(&mut self) {
        self.visited = true;
    }

    /// Raw passage bits, `0bNSWE`.
    #[inline]
    pub fn passages(&self) -> u8 {
        self.passages
    }

    pub fn passage_directions(&self) -> DirectionSmallVec {
        CompassPrimary::ALL.iter()
            .cloned()
            .filter(|dir| self.has_passage(*dir))
            .collect()
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn new_cell_is_walled_and_unvisited() {
        let cell = Cell::new();
        assert!(!cell.is_visited());
        assert_eq!(cell.passages(), 0);
        for dir in CompassPrimary::ALL.iter() {
            assert!(!cell.has_passage(*dir));
        }
    }

    #[test]
    fn passage_bits() {
        let mut cell = Cell::new();
        cell.set_passage(CompassPrimary::North);
        assert_eq!(cell.passages(), 0b1000);
        cell.set_passage(CompassPrimary::East);
        assert_eq!(cell.passages(), 0b1001);

        // setting twice is harmless
        cell.set_passage(CompassPrimary::East);
        assert_eq!(cell.passages(), 0b1001);

        assert!(cell.has_passage(CompassPrimary::North));
        assert!(cell.has_passage(CompassPrimary::East));
        assert!(!cell.has_passage(CompassPrimary::South));
        assert!(!cell.has_passage(CompassPrimary::West));
        assert_eq!(&*cell.passage_directions(),
                   &[CompassPrimary::North, CompassPrimary::East]);
    }

    #[test]
    fn visiting() {
        let mut cell = Cell::new();
        cell.mark_visited();
        assert!(cell.is_visited());
        assert_eq!(cell.passages(), 0);
    }

    #[test]
    fn opposites() {
        for dir in CompassPrimary::ALL.iter() {
            assert_ne!(dir.opposite(), *dir);
            assert_eq!(dir.opposite().opposite(), *dir);
        }
    }

    #[test]
    fn row_major_coordinates() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert_eq!(Cartesian2DCoordinate::from_row_major_index(0, Width(3)), gc(0, 0));
        assert_eq!(Cartesian2DCoordinate::from_row_major_index(2, Width(3)), gc(2, 0));
        assert_eq!(Cartesian2DCoordinate::from_row_major_index(4, Width(3)), gc(1, 1));
        assert_eq!(Cartesian2DCoordinate::from((7, 9)), gc(7, 9));
    }
}
