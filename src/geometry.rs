//! Board geometry shared by the renderer and the input mapper.
//!
//! The cell-index <-> pixel-center conversion lives here so the two can
//! never disagree about where a stone sits.

/// Grid dimension.
pub const SIZE: usize = 15;
/// Cell pitch in pixels.
pub const CELL: f64 = 30.0;
/// Stone radius in pixels.
pub const RADIUS: f64 = 10.0;
/// Drawing surface edge length in pixels.
pub const SURFACE: f64 = SIZE as f64 * CELL;

/// Pixel center of the grid intersection at `index`.
/// Grid lines are offset half a cell so they pass through stone centers.
pub fn cell_center(index: usize) -> f64 {
    CELL / 2.0 + index as f64 * CELL
}

/// Maps a pointer position into a board cell, given the surface origin.
/// Returns `None` when either axis falls outside `[0, SIZE)`.
///
/// Geometric validity only; whose turn it is or whether the cell is
/// occupied is the server's call.
pub fn map_click(
    pointer_x: f64,
    pointer_y: f64,
    origin_x: f64,
    origin_y: f64,
) -> Option<(usize, usize)> {
    let col = ((pointer_x - origin_x) / CELL).floor();
    let row = ((pointer_y - origin_y) / CELL).floor();

    if col < 0.0 || row < 0.0 || col >= SIZE as f64 || row >= SIZE as f64 {
        return None;
    }

    Some((col as usize, row as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t01_click_inside_first_cell_maps_to_origin_cell() {
        assert_eq!(map_click(0.0, 0.0, 0.0, 0.0), Some((0, 0)));
        assert_eq!(map_click(29.9, 29.9, 0.0, 0.0), Some((0, 0)));
    }

    #[test]
    fn click_at_47_47_maps_to_cell_1_1() {
        assert_eq!(map_click(47.0, 47.0, 0.0, 0.0), Some((1, 1)));
    }

    #[test]
    fn last_inside_pixel_maps_to_cell_14_14_and_next_is_rejected() {
        assert_eq!(map_click(449.0, 449.0, 0.0, 0.0), Some((14, 14)));
        assert_eq!(map_click(450.0, 450.0, 0.0, 0.0), None);
    }

    #[test]
    fn surface_origin_is_subtracted_before_mapping() {
        assert_eq!(map_click(147.0, 257.0, 100.0, 200.0), Some((1, 1)));
    }

    #[test]
    fn clicks_left_or_above_the_surface_are_rejected() {
        assert_eq!(map_click(-1.0, 10.0, 0.0, 0.0), None);
        assert_eq!(map_click(10.0, -1.0, 0.0, 0.0), None);
        assert_eq!(map_click(50.0, 50.0, 100.0, 100.0), None);
    }

    #[test]
    fn mapping_is_total_over_arbitrary_pointer_coordinates() {
        for x in (-500..1500).step_by(37) {
            for y in (-500..1500).step_by(41) {
                if let Some((col, row)) = map_click(x as f64, y as f64, 0.0, 0.0) {
                    assert!(col < SIZE);
                    assert!(row < SIZE);
                }
            }
        }
    }

    #[test]
    fn cell_centers_map_back_to_their_own_cell() {
        for col in 0..SIZE {
            for row in 0..SIZE {
                let mapped = map_click(cell_center(col), cell_center(row), 0.0, 0.0);
                assert_eq!(mapped, Some((col, row)));
            }
        }
    }
}
