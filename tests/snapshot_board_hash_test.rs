use tui_gems::core::snapshot::{cell_from_u8, fnv1a64};
use tui_gems::core::{Board, ControllerOptions, InteractionController, LevelShape};
use tui_gems::types::{Coord, DEFAULT_MOVE_MS};

fn settled(seed: u32) -> InteractionController {
    let mut c = InteractionController::new(
        LevelShape::default_level(),
        ControllerOptions {
            seed,
            ..ControllerOptions::default()
        },
    )
    .unwrap();
    c.settle().unwrap();
    c
}

#[test]
fn snapshot_board_hash_matches_cells() {
    let snap = settled(3).snapshot();
    assert_eq!(snap.board_hash, fnv1a64(snap.cells.iter().copied()));
    assert_eq!(snap.cells.len(), snap.width as usize * snap.height as usize);
}

#[test]
fn snapshot_board_hash_is_reproducible() {
    assert_eq!(settled(3).snapshot().board_hash, settled(3).snapshot().board_hash);
    assert_ne!(settled(3).snapshot().board_hash, settled(4).snapshot().board_hash);
}

#[test]
fn snapshot_board_hash_changes_on_swap() {
    let board = Board::from_ascii(&["rgb", "gbr", "rgb"]).unwrap();
    let mut c = InteractionController::from_board(board, ControllerOptions::default());
    c.settle().unwrap();
    let before = c.snapshot();

    c.select(Coord::new(0, 0)).unwrap();
    c.select(Coord::new(1, 0)).unwrap();
    let after = c.snapshot();

    assert_ne!(before.board_hash, after.board_hash);
    assert!(after.locked);
    assert!(!after.interactive());
    assert_eq!(after.swaps, 1);
}

#[test]
fn snapshot_into_reuses_buffer() {
    let mut c = settled(8);
    let mut snap = c.snapshot();
    let cap = snap.cells.capacity();

    c.tick(DEFAULT_MOVE_MS).unwrap();
    c.snapshot_into(&mut snap);
    assert_eq!(snap.cells.capacity(), cap);
    assert_eq!(snap, c.snapshot());
}

#[test]
fn snapshot_cells_decode_to_board() {
    let c = settled(12);
    let snap = c.snapshot();
    for y in 0..snap.height {
        for x in 0..snap.width {
            let i = y as usize * snap.width as usize + x as usize;
            assert_eq!(
                Some(cell_from_u8(snap.cells[i])),
                c.board().get(Coord::new(x as i16, y as i16))
            );
            assert_eq!(snap.cell(x, y), Some(cell_from_u8(snap.cells[i])));
        }
    }
}
