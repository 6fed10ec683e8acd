//! Rectangular row-major grids with toroidal neighbor lookup.
//!
//! Every field of the automaton (antigen, antibody, cytokine, suppressor)
//! is a `Grid`. Positions are `(x, y)` = `(column, row)`.

use crate::error::{GridError, ImmunoError, Result};
use crate::types::{Direction, GridPos};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A `width` x `height` grid storing one value per cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Construct a grid with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Result<Self> {
        require_non_empty(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![value; width * height],
        })
    }
}

impl<T: Clone + Default> Grid<T> {
    /// Construct a grid of default values.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, T::default())
    }
}

impl<T> Grid<T> {
    /// Construct a grid by evaluating `f` at every position, row by row.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(GridPos) -> T) -> Result<Self> {
        require_non_empty(width, height)?;
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(GridPos::new(x, y)));
            }
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        pos.within(self.width, self.height)
    }

    #[inline]
    fn offset(&self, pos: GridPos) -> usize {
        pos.y * self.width + pos.x
    }

    pub fn get(&self, pos: GridPos) -> Option<&T> {
        if self.contains(pos) {
            Some(&self.cells[self.offset(pos)])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, pos: GridPos) -> Option<&mut T> {
        if self.contains(pos) {
            let idx = self.offset(pos);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Value of the neighbor one cell away in `direction`, wrapping at the edges.
    pub fn neighbor(&self, pos: GridPos, direction: Direction) -> &T {
        &self[pos.step(direction, 1, self.width, self.height)]
    }

    /// Fail unless `pos` lies inside the grid.
    pub fn check_bounds(&self, pos: GridPos) -> Result<()> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(ImmunoError::Grid(GridError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            }))
        }
    }

    /// Fail unless this grid is `width` x `height`.
    pub fn check_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if self.dimensions() == (width, height) {
            Ok(())
        } else {
            Err(ImmunoError::dimension_mismatch(
                (width, height),
                self.dimensions(),
            ))
        }
    }

    /// Iterate `(position, value)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &T)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, v)| (GridPos::new(i % width, i / width), v))
    }

    /// Number of cells satisfying `predicate`.
    pub fn count(&self, predicate: impl Fn(&T) -> bool) -> usize {
        self.cells.iter().filter(|v| predicate(v)).count()
    }
}

impl Grid<bool> {
    /// Positions of all set cells, row-major.
    pub fn set_positions(&self) -> Vec<GridPos> {
        self.iter()
            .filter_map(|(pos, &set)| if set { Some(pos) } else { None })
            .collect()
    }
}

impl<T> Index<GridPos> for Grid<T> {
    type Output = T;

    fn index(&self, pos: GridPos) -> &T {
        &self.cells[self.offset(pos)]
    }
}

impl<T> IndexMut<GridPos> for Grid<T> {
    fn index_mut(&mut self, pos: GridPos) -> &mut T {
        let idx = self.offset(pos);
        &mut self.cells[idx]
    }
}

fn require_non_empty(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        Err(ImmunoError::Grid(GridError::EmptyDimensions))
    } else {
        Ok(())
    }
}
