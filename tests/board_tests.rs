//! Board tests - collision, merge and line sweep

use blockfall::core::{Board, PieceCatalog, Shape};
use blockfall::types::{PieceKind, Rotation, EMPTY};

fn o_shape() -> Shape {
    Shape::from_rows(&[[2u8, 2], [2, 2]]).unwrap()
}

fn fill_row_except(board: &mut Board, y: i16, holes: &[i16], cell: u8) {
    for x in 0..board.width() as i16 {
        if !holes.contains(&x) {
            assert!(board.set(x, y, cell));
        }
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), 10);
    assert_eq!(board.height(), 20);
    assert!(board.cells().iter().all(|&c| c == EMPTY));
    assert_eq!(board.to_rows().len(), 20);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(10, 0), None);
    assert_eq!(board.get(0, 20), None);
    assert_eq!(board.get(9, 19), Some(EMPTY));
}

#[test]
fn test_collide_walls_and_floor() {
    let board = Board::new();
    let o = o_shape();

    assert!(!board.collide(&o, 0, 0));
    assert!(!board.collide(&o, 8, 18));
    assert!(board.collide(&o, -1, 0));
    assert!(board.collide(&o, 9, 0));
    assert!(board.collide(&o, 4, 19));
}

#[test]
fn test_collide_above_top_ignores_contents_but_not_walls() {
    let mut board = Board::new();
    fill_row_except(&mut board, 0, &[], 1);
    let o = o_shape();

    // Entirely above the field: only walls matter
    assert!(!board.collide(&o, 4, -2));
    assert!(board.collide(&o, -1, -2));
    assert!(board.collide(&o, 9, -5));

    // Lower half reaches the filled row 0
    assert!(board.collide(&o, 4, -1));
}

#[test]
fn test_collide_with_settled_cells() {
    let mut board = Board::new();
    board.set(5, 10, 3);
    let o = o_shape();

    assert!(board.collide(&o, 4, 9));
    assert!(board.collide(&o, 5, 10));
    assert!(!board.collide(&o, 6, 9));
    assert!(!board.collide(&o, 4, 8));
}

#[test]
fn test_merge_writes_cell_ids() {
    let catalog = PieceCatalog::standard();
    let mut board = Board::new();
    let t = catalog.shape(PieceKind::T, Rotation::North);

    board.merge(t, 3, 18);

    assert_eq!(board.get(4, 18), Some(PieceKind::T.cell()));
    assert_eq!(board.row(19)[3..6], [1, 1, 1]);
    assert_eq!(board.cells().iter().filter(|&&c| c != EMPTY).count(), 4);
}

#[test]
fn test_merge_drops_cells_above_top() {
    let mut board = Board::new();
    board.merge(&o_shape(), 0, -1);

    assert_eq!(board.row(0)[..2], [2, 2]);
    assert_eq!(board.cells().iter().filter(|&&c| c != EMPTY).count(), 2);
}

#[test]
fn test_sweep_bottom_row() {
    let mut board = Board::new();
    fill_row_except(&mut board, 19, &[], 5);
    board.set(3, 18, 4);

    assert_eq!(board.sweep(), 1);
    assert_eq!(board.get(3, 19), Some(4));
    assert_eq!(board.cells().iter().filter(|&&c| c != EMPTY).count(), 1);
}

#[test]
fn test_sweep_non_adjacent_rows() {
    let mut board = Board::new();
    fill_row_except(&mut board, 19, &[], 1);
    fill_row_except(&mut board, 18, &[0], 2);
    fill_row_except(&mut board, 17, &[], 3);
    board.set(7, 16, 6);

    assert_eq!(board.sweep(), 2);

    // The partial row drops to the floor, the lone cell sits on it
    assert_eq!(board.get(0, 19), Some(EMPTY));
    assert_eq!(board.get(1, 19), Some(2));
    assert_eq!(board.get(7, 18), Some(6));
    assert!(board.row(17).iter().all(|&c| c == EMPTY));
}

#[test]
fn test_sweep_includes_top_row() {
    let mut board = Board::new();
    fill_row_except(&mut board, 0, &[], 7);

    assert_eq!(board.sweep(), 1);
    assert!(board.cells().iter().all(|&c| c == EMPTY));
}

#[test]
fn test_sweep_is_idempotent() {
    let mut board = Board::new();
    for y in 15..20 {
        fill_row_except(&mut board, y, &[], 1);
    }
    fill_row_except(&mut board, 14, &[2, 6], 3);

    assert_eq!(board.sweep(), 5);
    let after = board.clone();
    assert_eq!(board.sweep(), 0);
    assert_eq!(board, after);
}

#[test]
fn test_custom_board_sizes() {
    assert!(Board::with_size(3, 10).is_err());
    assert!(Board::with_size(20, 40).is_err());

    let board = Board::with_size(6, 4).unwrap();
    assert_eq!((board.width(), board.height()), (4, 6));
    assert!(board.collide(&o_shape(), 3, 0));
    assert!(!board.collide(&o_shape(), 2, 4));
}

#[test]
fn test_filling_last_gap_clears_row_and_shifts_down() {
    let mut board = Board::new();
    fill_row_except(&mut board, 19, &[0], 6);
    board.set(3, 17, 4);
    board.set(8, 12, 2);

    // Single cell landing in column 0 of row 19
    let dot = Shape::from_rows(&[[0u8, 0], [5, 0]]).unwrap();
    assert!(!board.collide(&dot, 0, 18));
    board.merge(&dot, 0, 18);

    assert_eq!(board.sweep(), 1);
    assert!(board.row(19).iter().all(|&c| c == EMPTY));
    assert_eq!(board.get(3, 18), Some(4));
    assert_eq!(board.get(8, 13), Some(2));
    assert!(board.row(0).iter().all(|&c| c == EMPTY));
    assert_eq!(board.cells().iter().filter(|&&c| c != EMPTY).count(), 2);
}
