//! Board rendering against an abstract drawing surface.

use crate::board::{Board, Cell};
use crate::geometry::{RADIUS, SIZE, cell_center};

/// How a stone disc is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoneStyle {
    /// Solid black fill.
    Solid,
    /// White fill with a black outline.
    Outlined,
}

/// Drawing primitives the renderer needs. The browser implementation is a
/// canvas 2D context; tests record the calls instead.
pub trait Surface {
    fn clear(&mut self);
    fn grid_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
    fn stone(&mut self, cx: f64, cy: f64, radius: f64, style: StoneStyle);
}

fn style_for(cell: Cell) -> Option<StoneStyle> {
    match cell {
        Cell::Empty => None,
        Cell::Black => Some(StoneStyle::Solid),
        Cell::White => Some(StoneStyle::Outlined),
    }
}

/// Full redraw: clear, grid, then one disc per occupied cell.
/// Stateless and idempotent; the same board always paints the same frame.
pub fn draw_board(surface: &mut impl Surface, board: &Board) {
    surface.clear();

    let near = cell_center(0);
    let far = cell_center(SIZE - 1);
    for i in 0..SIZE {
        let at = cell_center(i);
        surface.grid_line(near, at, far, at);
        surface.grid_line(at, near, at, far);
    }

    for row in 0..SIZE {
        for col in 0..SIZE {
            if let Some(style) = style_for(board.get(col, row)) {
                surface.stone(cell_center(col), cell_center(row), RADIUS, style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        GridLine(f64, f64, f64, f64),
        Stone(f64, f64, f64, StoneStyle),
    }

    #[derive(Default)]
    struct RecordingSurface {
        ops: Vec<Op>,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }

        fn grid_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
            self.ops.push(Op::GridLine(x1, y1, x2, y2));
        }

        fn stone(&mut self, cx: f64, cy: f64, radius: f64, style: StoneStyle) {
            self.ops.push(Op::Stone(cx, cy, radius, style));
        }
    }

    fn board_with(stones: &[(usize, usize, u8)]) -> Board {
        let mut rows = vec![vec![0u8; SIZE]; SIZE];
        for &(col, row, value) in stones {
            rows[row][col] = value;
        }
        Board::from_rows(&rows).unwrap()
    }

    fn stones_drawn(surface: &RecordingSurface) -> Vec<&Op> {
        surface
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Stone(..)))
            .collect()
    }

    #[test]
    fn t01_empty_board_paints_grid_and_no_stones() {
        let mut surface = RecordingSurface::default();

        draw_board(&mut surface, &Board::empty());

        assert_eq!(surface.ops[0], Op::Clear);
        let lines = surface
            .ops
            .iter()
            .filter(|op| matches!(op, Op::GridLine(..)))
            .count();
        assert_eq!(lines, 2 * SIZE);
        assert!(stones_drawn(&surface).is_empty());
    }

    #[test]
    fn t02_one_stone_per_occupied_cell() {
        let board = board_with(&[(0, 0, 1), (7, 7, 2), (14, 14, 1)]);
        let mut surface = RecordingSurface::default();

        draw_board(&mut surface, &board);

        assert_eq!(stones_drawn(&surface).len(), board.stone_count());
    }

    #[test]
    fn t03_fill_style_follows_cell_value() {
        let board = board_with(&[(3, 4, 1), (5, 6, 2)]);
        let mut surface = RecordingSurface::default();

        draw_board(&mut surface, &board);

        let stones = stones_drawn(&surface);
        assert_eq!(
            *stones[0],
            Op::Stone(cell_center(3), cell_center(4), RADIUS, StoneStyle::Solid)
        );
        assert_eq!(
            *stones[1],
            Op::Stone(cell_center(5), cell_center(6), RADIUS, StoneStyle::Outlined)
        );
    }

    #[test]
    fn t04_redraw_is_idempotent() {
        let board = board_with(&[(2, 2, 1), (9, 3, 2)]);

        let mut first = RecordingSurface::default();
        let mut second = RecordingSurface::default();
        draw_board(&mut first, &board);
        draw_board(&mut second, &board);
        draw_board(&mut second, &board);

        let (head, tail) = second.ops.split_at(first.ops.len());
        assert_eq!(first.ops, head);
        assert_eq!(first.ops, tail);
    }

    #[test]
    fn grid_lines_pass_through_stone_centers() {
        let mut surface = RecordingSurface::default();

        draw_board(&mut surface, &Board::empty());

        let first_horizontal = Op::GridLine(
            cell_center(0),
            cell_center(0),
            cell_center(SIZE - 1),
            cell_center(0),
        );
        assert_eq!(surface.ops[1], first_horizontal);
    }

    #[test]
    fn full_board_draws_all_stones() {
        let rows = vec![vec![1u8; SIZE]; SIZE];
        let board = Board::from_rows(&rows).unwrap();
        let mut surface = RecordingSurface::default();

        draw_board(&mut surface, &board);

        assert_eq!(stones_drawn(&surface).len(), SIZE * SIZE);
    }
}
