//! Padded 2D grid over a flat buffer
//!
//! The active `rows × cols` area is surrounded by `padding` cells of
//! `border_value` on every side. Any neighbour offset added to an active
//! flat index stays inside the buffer, so neighbour walks need no bounds
//! checks near the edges.
//!
//! ```
//! use aoc_solutions::utils::grid::{Connectivity, Grid};
//!
//! let grid: Grid<u8> = Grid::from_lines(&["@.@", ".@.", "@@@"], 1, b'.');
//! let centre = grid.index_of(1, 1);
//! assert_eq!(grid.count_neighbours(centre, &b'@', Connectivity::Eight), 5);
//! assert_eq!(grid.count_neighbours(centre, &b'@', Connectivity::Four), 1);
//! ```

use std::fmt;
use std::ops::{Index, IndexMut};

/// Which neighbours a step may reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// Up, left, right, down
    #[default]
    Four,
    /// The four orthogonal neighbours plus the diagonals
    Eight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    padding: usize,
    stride: usize,
    data: Vec<T>,
    border_value: T,
    // Row-major order; BFS tie-breaks follow it
    offsets_8: [isize; 8],
    offsets_4: [isize; 4],
}

impl<T: Clone> Grid<T> {
    /// Grid whose active cells hold `fill` and whose border holds `border`.
    pub fn new(rows: usize, cols: usize, padding: usize, fill: T, border: T) -> Self {
        let mut grid = Self::bordered(rows, cols, padding, border);
        for r in 0..rows {
            grid.row_mut(r).fill(fill.clone());
        }
        grid
    }

    /// Grid whose cell `(r, c)` is byte `c` of `lines[r]`.
    ///
    /// The width is taken from the first line. Shorter lines leave their
    /// missing cells at `border`, longer ones are cut.
    pub fn from_lines<S>(lines: &[S], padding: usize, border: T) -> Self
    where
        S: AsRef<str>,
        T: From<u8>,
    {
        Self::from_lines_with(lines, T::from, padding, border)
    }

    /// Like [`Grid::from_lines`], mapping every byte through `transform`.
    ///
    /// ```
    /// use aoc_solutions::utils::grid::Grid;
    ///
    /// let grid = Grid::from_lines_with(&["S.^", ".^."], |b| match b {
    ///     b'^' => -1i64,
    ///     b'S' => 1,
    ///     _ => 0,
    /// }, 1, 0);
    /// assert_eq!(grid[(0, 0)], 1);
    /// assert_eq!(grid[(1, 1)], -1);
    /// ```
    pub fn from_lines_with<S, F>(lines: &[S], mut transform: F, padding: usize, border: T) -> Self
    where
        S: AsRef<str>,
        F: FnMut(u8) -> T,
    {
        let cols = lines.first().map_or(0, |l| l.as_ref().len());
        let mut grid = Self::bordered(lines.len(), cols, padding, border);
        for (r, line) in lines.iter().enumerate() {
            let row = grid.row_mut(r);
            for (cell, &b) in row.iter_mut().zip(line.as_ref().as_bytes()) {
                *cell = transform(b);
            }
        }
        grid
    }

    fn bordered(rows: usize, cols: usize, padding: usize, border: T) -> Self {
        let stride = cols + 2 * padding;
        let s = stride as isize;
        Self {
            rows,
            cols,
            padding,
            stride,
            data: vec![border.clone(); (rows + 2 * padding) * stride],
            border_value: border,
            offsets_8: [-s - 1, -s, -s + 1, -1, 1, s - 1, s, s + 1],
            offsets_4: [-s, -1, 1, s],
        }
    }
}

impl<T> Grid<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn padding(&self) -> usize {
        self.padding
    }

    /// Physical row width, `cols + 2 * padding`
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn border_value(&self) -> &T {
        &self.border_value
    }

    /// Length of the whole buffer, padding included
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Flat index of active cell `(r, c)`.
    #[inline]
    pub fn index_of(&self, r: usize, c: usize) -> usize {
        (r + self.padding) * self.stride + c + self.padding
    }

    /// Active coordinates of flat index `idx`; only meaningful for active cells.
    #[inline]
    pub fn coord_of(&self, idx: usize) -> (usize, usize) {
        (
            idx / self.stride - self.padding,
            idx % self.stride - self.padding,
        )
    }

    #[inline]
    pub fn in_active_area(&self, r: usize, c: usize) -> bool {
        r < self.rows && c < self.cols
    }

    /// Checked access to active cell `(r, c)`.
    pub fn get(&self, r: usize, c: usize) -> Option<&T> {
        self.in_active_area(r, c).then(|| &self.data[self.index_of(r, c)])
    }

    pub fn get_mut(&mut self, r: usize, c: usize) -> Option<&mut T> {
        if self.in_active_area(r, c) {
            let idx = self.index_of(r, c);
            Some(&mut self.data[idx])
        } else {
            None
        }
    }

    /// Signed flat deltas to the neighbours of a cell.
    #[inline]
    pub fn offsets(&self, connectivity: Connectivity) -> &[isize] {
        match connectivity {
            Connectivity::Four => &self.offsets_4,
            Connectivity::Eight => &self.offsets_8,
        }
    }

    /// Flat indices of the neighbours of `idx`, border cells included.
    pub fn neighbours(
        &self,
        idx: usize,
        connectivity: Connectivity,
    ) -> impl Iterator<Item = usize> + '_ {
        self.offsets(connectivity)
            .iter()
            .map(move |&off| idx.wrapping_add_signed(off))
    }

    /// Cell `dy` rows and `dx` columns away from `idx`.
    #[inline]
    pub fn peek(&self, idx: usize, dy: isize, dx: isize) -> &T {
        &self.data[idx.wrapping_add_signed(dy * self.stride as isize + dx)]
    }

    /// Active cells of row `r`.
    pub fn row(&self, r: usize) -> &[T] {
        let start = self.index_of(r, 0);
        &self.data[start..start + self.cols]
    }

    pub fn row_mut(&mut self, r: usize) -> &mut [T] {
        let start = self.index_of(r, 0);
        let cols = self.cols;
        &mut self.data[start..start + cols]
    }

    /// Flat indices of every active cell, row by row.
    pub fn active_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.cols).map(move |c| self.index_of(r, c)))
    }
}

impl<T: PartialEq> Grid<T> {
    /// How many neighbours of `idx` equal `value`.
    ///
    /// Border cells count like any other cell, so pick a `border_value`
    /// that differs from `value` unless the edge should match.
    pub fn count_neighbours(&self, idx: usize, value: &T, connectivity: Connectivity) -> usize {
        self.neighbours(idx, connectivity)
            .filter(|&n| self.data[n] == *value)
            .count()
    }

    /// First flat index holding `value`, scanning the whole buffer.
    ///
    /// The border is scanned too, so a `value` equal to `border_value`
    /// matches the top-left padding cell.
    pub fn find(&self, value: &T) -> Option<usize> {
        self.data.iter().position(|v| v == value)
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (r, c): (usize, usize)) -> &T {
        debug_assert!(self.in_active_area(r, c), "({r}, {c}) outside active area");
        &self.data[self.index_of(r, c)]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut T {
        debug_assert!(self.in_active_area(r, c), "({r}, {c}) outside active area");
        let idx = self.index_of(r, c);
        &mut self.data[idx]
    }
}

impl<T> Index<usize> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, idx: usize) -> &T {
        &self.data[idx]
    }
}

impl<T> IndexMut<usize> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, idx: usize) -> &mut T {
        &mut self.data[idx]
    }
}

/// How one cell renders when a grid is displayed
pub trait GridCell {
    fn fmt_cell(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl GridCell for u8 {
    fn fmt_cell(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as char)
    }
}

impl GridCell for char {
    fn fmt_cell(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

macro_rules! numeric_cell {
    ($($t:ty),*) => {
        $(impl GridCell for $t {
            fn fmt_cell(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{self} ")
            }
        })*
    };
}

numeric_cell!(i8, i16, i32, i64, u16, u32, u64, usize, bool);

impl<T: GridCell> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            for cell in self.row(r) {
                cell.fmt_cell(f)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
