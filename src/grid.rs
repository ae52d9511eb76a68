//! Grid model shared by the generator, the pathfinder and the game session.
//!
//! This module contains the [`Grid`] type, a rectangular array of typed cells addressed by
//! [`Pos`] coordinates, along with the [`CellKind`] enumeration describing what each cell holds.

use std::fmt::{self, Display, Formatter, Write as _};

use crate::{
    error::{MazeError, Result},
    types::Direction,
};

/// Grid coordinate expressed as a row and a column.
///
/// Rows grow downwards and columns grow to the right, with `(0, 0)` being the top-left corner of
/// the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    /// Zero-based row index.
    pub row: usize,
    /// Zero-based column index.
    pub col: usize,
}

impl Pos {
    /// Builds a position from a row and a column.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the position one step away in the given direction.
    ///
    /// This function returns [`None`] when the step would underflow below row or column zero.
    /// Overflow past the grid's far edge is not checked here, as the position knows nothing about
    /// the grid it lives in.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Option<Self> {
        self.offset(direction, 1)
    }

    /// Returns the position `distance` cells away in the given direction.
    ///
    /// Used by the generator to jump between rooms, which sit two cells apart.
    #[must_use]
    pub const fn offset(self, direction: Direction, distance: usize) -> Option<Self> {
        let (d_row, d_col) = direction.delta();
        let Some(row) = shift(self.row, d_row, distance) else {
            return None;
        };
        let Some(col) = shift(self.col, d_col, distance) else {
            return None;
        };

        Some(Self { row, col })
    }

    /// Returns the Manhattan distance between two positions.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// Moves a single coordinate by `distance` along the sign of `delta`.
const fn shift(value: usize, delta: i8, distance: usize) -> Option<usize> {
    match delta {
        1 => value.checked_add(distance),
        -1 => value.checked_sub(distance),
        _ => Some(value),
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Content of a single grid cell.
///
/// Each cell holds exactly one of these at any time. Item cells (keys, traps, coins) are mirrored
/// by the registries held in the game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Impassable wall.
    Wall,
    /// Carved, empty floor.
    Open,
    /// Cell currently occupied by the player.
    Player,
    /// The maze exit.
    Exit,
    /// A key required to unlock the exit.
    Key,
    /// A trap that ends the game when stepped on.
    Trap,
    /// A collectible coin.
    Coin,
    /// Transient marker for the next hinted step, only ever placed on display copies.
    HintMarker,
}

impl CellKind {
    /// Returns the single-character glyph used when printing the cell as text.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Open => ' ',
            Self::Player => 'P',
            Self::Exit => 'E',
            Self::Key => 'K',
            Self::Trap => 'T',
            Self::Coin => 'C',
            Self::HintMarker => 'H',
        }
    }
}

/// Rectangular grid of cells.
///
/// This structure stores its cells in a single row-major vector. Every accessor is bounds-checked
/// and reports [`MazeError::OutOfBounds`] instead of clamping or panicking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
    /// Row-major cell storage of length `width * height`.
    cells: Vec<CellKind>,
}

impl Grid {
    /// Builds a `width` by `height` grid with every cell set to `fill`.
    #[must_use]
    pub fn filled(width: usize, height: usize, fill: CellKind) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns whether the position lies inside the grid.
    #[must_use]
    pub const fn in_bounds(&self, pos: Pos) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    /// Returns whether the position lies on the outer border of the grid.
    #[must_use]
    pub const fn is_border(&self, pos: Pos) -> bool {
        pos.row == 0 || pos.col == 0 || pos.row + 1 == self.height || pos.col + 1 == self.width
    }

    /// Returns the content of the cell at `pos`.
    ///
    /// # Errors
    ///
    /// - [`MazeError::OutOfBounds`] if `pos` lies outside the grid.
    pub fn get(&self, pos: Pos) -> Result<CellKind> {
        let index = self.index(pos)?;
        self.cells
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_bounds(pos))
    }

    /// Overwrites the content of the cell at `pos`.
    ///
    /// # Errors
    ///
    /// - [`MazeError::OutOfBounds`] if `pos` lies outside the grid.
    pub fn set(&mut self, pos: Pos, kind: CellKind) -> Result<()> {
        let index = self.index(pos)?;
        let err = self.out_of_bounds(pos);
        let cell = self.cells.get_mut(index).ok_or(err)?;
        *cell = kind;

        Ok(())
    }

    /// Returns whether the cell at `pos` can be walked through, which is any cell but a wall.
    ///
    /// # Errors
    ///
    /// - [`MazeError::OutOfBounds`] if `pos` lies outside the grid.
    pub fn is_passable(&self, pos: Pos) -> Result<bool> {
        Ok(self.get(pos)? != CellKind::Wall)
    }

    /// Iterates over every position of the grid in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Pos::new(row, col)))
    }

    /// Iterates over every position whose cell holds `kind`, in row-major order.
    pub fn positions_of(&self, kind: CellKind) -> impl Iterator<Item = Pos> + '_ {
        self.positions()
            .zip(self.cells.iter())
            .filter_map(move |(pos, cell)| (*cell == kind).then_some(pos))
    }

    /// Iterates over the cells of a single row, left to right.
    pub fn row(&self, row: usize) -> impl Iterator<Item = CellKind> + '_ {
        self.cells
            .iter()
            .skip(row * self.width)
            .take(if row < self.height { self.width } else { 0 })
            .copied()
    }

    /// Converts a position into an index into the cell storage.
    fn index(&self, pos: Pos) -> Result<usize> {
        if self.in_bounds(pos) {
            Ok(pos.row * self.width + pos.col)
        } else {
            Err(self.out_of_bounds(pos))
        }
    }

    /// Builds the out-of-bounds error for `pos` against this grid.
    const fn out_of_bounds(&self, pos: Pos) -> MazeError {
        MazeError::OutOfBounds {
            pos,
            width: self.width,
            height: self.height,
        }
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            if row > 0 {
                f.write_char('\n')?;
            }
            for cell in self.row(row) {
                f.write_char(cell.glyph())?;
            }
        }

        Ok(())
    }
}
