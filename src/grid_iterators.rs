use std::fmt;

use crate::cells::Cartesian2DCoordinate;
use crate::units::{Height, Width};

/// Row major iteration over every coordinate of a `width * height` grid.
#[derive(Clone)]
pub struct CellIter {
    width: Width,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub fn new(width: Width, height: Height) -> CellIter {
        CellIter {
            width,
            current_cell_number: 0,
            cells_count: width.0 * height.0,
        }
    }
}

impl fmt::Debug for CellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Cartesian2DCoordinate::from_row_major_index(self.current_cell_number,
                                                                    self.width);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

/// Yields each row of a grid, top to bottom, as a `Vec` of its coordinates.
#[derive(Debug, Copy, Clone)]
pub struct RowIter {
    current_row: usize,
    row_length: Width,
    rows_count: Height,
}

impl RowIter {
    pub fn new(width: Width, height: Height) -> RowIter {
        RowIter {
            current_row: 0,
            row_length: width,
            rows_count: height,
        }
    }
}

impl ExactSizeIterator for RowIter {} // default impl using size_hint()
impl Iterator for RowIter {
    type Item = Vec<Cartesian2DCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        let Height(count) = self.rows_count;
        if self.current_row < count {
            let Width(length) = self.row_length;
            let row = self.current_row as u32;
            let coords = (0..length)
                .map(|i: usize| Cartesian2DCoordinate::new(i as u32, row))
                .collect();
            self.current_row += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.rows_count.0 - self.current_row;
        (lower_bound, Some(lower_bound))
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn cell_iter() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        let cells = CellIter::new(Width(2), Height(3)).collect::<Vec<_>>();
        assert_eq!(cells,
                   &[gc(0, 0), gc(1, 0), gc(0, 1), gc(1, 1), gc(0, 2), gc(1, 2)]);
    }

    #[test]
    fn cell_iter_size_hint() {
        let mut iter = CellIter::new(Width(3), Height(3));
        assert_eq!(iter.len(), 9);
        iter.next();
        assert_eq!(iter.len(), 8);
    }

    #[test]
    fn row_iter() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        let rows = RowIter::new(Width(2), Height(2)).collect::<Vec<_>>();
        assert_eq!(rows, vec![vec![gc(0, 0), gc(1, 0)], vec![gc(0, 1), gc(1, 1)]]);
        assert_eq!(RowIter::new(Width(4), Height(5)).len(), 5);
    }
}
