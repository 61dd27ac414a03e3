use thiserror::Error;

use crate::geometry::SIZE;

/// One board cell as reported by the server: 0=empty, 1=black, 2=white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    fn from_wire(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Empty),
            1 => Some(Self::Black),
            2 => Some(Self::White),
            _ => None,
        }
    }
}

/// Rejection reason for a wire matrix that is not a valid 15x15 board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("expected {expected} rows, got {got}")]
    RowCount { expected: usize, got: usize },
    #[error("row {row} has {got} cells, expected {expected}")]
    RowLength { row: usize, expected: usize, got: usize },
    #[error("cell ({col},{row}) holds invalid value {value}")]
    CellValue { col: usize, row: usize, value: u8 },
}

/// A full board snapshot, replaced whole on every poll.
/// Row-major: `cells[row][col]`, matching the wire matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; SIZE]; SIZE],
        }
    }

    /// Validates a wire matrix. Anything but `SIZE` rows of `SIZE` cells
    /// valued 0..=2 is rejected, and no partial board is ever produced.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, BoardError> {
        if rows.len() != SIZE {
            return Err(BoardError::RowCount {
                expected: SIZE,
                got: rows.len(),
            });
        }

        let mut board = Self::empty();
        for (row, values) in rows.iter().enumerate() {
            if values.len() != SIZE {
                return Err(BoardError::RowLength {
                    row,
                    expected: SIZE,
                    got: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                board.cells[row][col] =
                    Cell::from_wire(value).ok_or(BoardError::CellValue { col, row, value })?;
            }
        }

        Ok(board)
    }

    pub fn get(&self, col: usize, row: usize) -> Cell {
        self.cells[row][col]
    }

    /// Number of occupied cells.
    pub fn stone_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell != Cell::Empty)
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}
