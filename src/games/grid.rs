//! Fixed-size row-major grid used as the board for every variant.

use super::types::{Cell, Side};
use serde::{Deserialize, Serialize};

/// Row-major board of `width * height` cells.
///
/// The dimensions are fixed at construction; there is no way to grow or
/// shrink a grid afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    /// Creates a grid filled with `T::default()`.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![T::default(); width * height],
        }
    }
}

impl<T: Copy> Grid<T> {
    /// Creates a grid from row-major cells.
    ///
    /// Returns `None` if the cell count does not match the dimensions.
    pub fn from_cells(width: usize, height: usize, cells: Vec<T>) -> Option<Self> {
        (cells.len() == width * height).then_some(Self {
            width,
            height,
            cells,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; grids have at least one cell in practice.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at a flat index.
    pub fn get(&self, index: usize) -> Option<T> {
        self.cells.get(index).copied()
    }

    /// Cell at a (row, column) coordinate.
    pub fn at(&self, row: usize, col: usize) -> Option<T> {
        if row < self.height && col < self.width {
            self.get(self.index(row, col))
        } else {
            None
        }
    }

    /// Overwrites a cell. Out-of-range indices are ignored and reported as false.
    pub fn set(&mut self, index: usize, value: T) -> bool {
        match self.cells.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Flat index of a (row, column) coordinate.
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// (row, column) of a flat index.
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index / self.width, index % self.width)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }
}

impl Grid<Cell> {
    /// Returns true when no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Finds the first run of `length` equal marks in any direction.
    ///
    /// Scans horizontally, vertically and along both diagonals. Returns the
    /// owning side and the cells of the run.
    pub fn find_run(&self, length: usize) -> Option<(Side, Vec<usize>)> {
        const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

        for row in 0..self.height {
            for col in 0..self.width {
                let Some(side) = self.at(row, col).and_then(Cell::side) else {
                    continue;
                };
                for (dr, dc) in DIRECTIONS {
                    let run: Vec<usize> = (0..length as isize)
                        .map_while(|step| {
                            let r = row as isize + dr * step;
                            let c = col as isize + dc * step;
                            if r < 0 || c < 0 {
                                return None;
                            }
                            let (r, c) = (r as usize, c as usize);
                            (self.at(r, c)? == Cell::Occupied(side)).then(|| self.index(r, c))
                        })
                        .collect();
                    if run.len() == length {
                        return Some((side, run));
                    }
                }
            }
        }

        None
    }
}
