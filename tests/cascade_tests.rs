//! Cascade resolution tests - convergence, idempotence and refill

use tui_gems::core::{find_run, Board, CascadeResolver, LevelShape, TileSpawner};
use tui_gems::core::clear_run;
use tui_gems::types::{BoardEvent, CellState, Color, Coord};

fn assert_settled(board: &Board) {
    for at in board.playable_coords() {
        assert!(
            matches!(board.get(at), Some(CellState::Occupied(_))),
            "cell {:?} not filled",
            at
        );
        assert_eq!(find_run(board, at), None, "run left at {:?}", at);
    }
}

fn shapes() -> Vec<LevelShape> {
    vec![
        LevelShape::default_level(),
        LevelShape::rect(7, 7).unwrap(),
        LevelShape::from_rows(&[
            "......", //
            "######", //
            "##.###", //
            "######", //
            "#.##.#", //
        ])
        .unwrap(),
    ]
}

#[test]
fn test_settle_converges_to_a_full_board_without_runs() {
    for shape in shapes() {
        for seed in 1..=20 {
            let mut board = Board::from_shape(&shape).unwrap();
            let mut resolver = CascadeResolver::new(TileSpawner::new(seed));
            let mut events = Vec::new();
            let (report, passes) = resolver.settle(&mut board, &mut events).unwrap();

            assert!(passes > 0);
            assert!(report.spawned as usize >= board.playable_coords().count());
            assert_settled(&board);
        }
    }
}

#[test]
fn test_pass_on_settled_board_is_idempotent() {
    let mut board = Board::from_shape(&LevelShape::default_level()).unwrap();
    let mut resolver = CascadeResolver::new(TileSpawner::new(99));
    let mut events = Vec::new();
    resolver.settle(&mut board, &mut events).unwrap();

    let before = board.clone();
    events.clear();
    for _ in 0..3 {
        let report = resolver.resolve_pass(&mut board, &mut events).unwrap();
        assert!(!report.moved_any);
    }
    assert_eq!(board, before);
    assert!(events.is_empty());
}

#[test]
fn test_same_seed_same_board() {
    let settle = |seed| {
        let mut board = Board::from_shape(&LevelShape::default_level()).unwrap();
        let mut events = Vec::new();
        CascadeResolver::new(TileSpawner::new(seed))
            .settle(&mut board, &mut events)
            .unwrap();
        (board, events)
    };
    assert_eq!(settle(5), settle(5));
}

#[test]
fn test_column_scenario_clear_and_refill() {
    // Five rows, red over red over red over blue over blue.
    let mut board = Board::from_ascii(&["r", "r", "r", "b", "b"]).unwrap();

    let run = find_run(&board, Coord::new(0, 2)).unwrap();
    assert_eq!(run.color, Color::Red);
    assert_eq!(run.length, 3);
    assert_eq!(run.cells().collect::<Vec<_>>().len(), 3);

    let mut removed = Vec::new();
    clear_run(&mut board, &run, &mut removed).unwrap();
    assert_eq!(board.to_ascii(), ["_", "_", "_", "b", "b"]);

    let mut resolver = CascadeResolver::new(TileSpawner::new(3));
    let mut events = Vec::new();
    let report = resolver.resolve_pass(&mut board, &mut events).unwrap();
    // Only the top row can take a new tile on the first pass.
    assert!(report.moved_any);
    assert_eq!(report.spawned, 1);
    assert!(board.is_occupied(Coord::new(0, 0)));

    resolver.settle(&mut board, &mut events).unwrap();
    assert_settled(&board);
}

#[test]
fn test_spawn_avoids_the_pair_below() {
    for seed in 1..=200 {
        let mut board = Board::from_ascii(&["_", "g", "g", "b"]).unwrap();
        let mut resolver = CascadeResolver::new(TileSpawner::new(seed));
        let mut events = Vec::new();
        resolver.resolve_pass(&mut board, &mut events).unwrap();

        assert_ne!(board.color_at(Coord::new(0, 0)), Some(Color::Green), "seed {}", seed);
        assert!(matches!(events[..], [BoardEvent::Spawned { .. }]));
    }
}

#[test]
fn test_events_describe_every_change() {
    let mut board = Board::from_ascii(&["..", "__", "r_", "gb"]).unwrap();
    let mut resolver = CascadeResolver::new(TileSpawner::new(11)).with_move_ms(75);
    let mut events = Vec::new();
    let report = resolver.resolve_pass(&mut board, &mut events).unwrap();

    let moved = events
        .iter()
        .filter(|e| matches!(e, BoardEvent::Moved { duration_ms: 75, .. }))
        .count();
    let spawned = events
        .iter()
        .filter(|e| matches!(e, BoardEvent::Spawned { duration_ms: 75, .. }))
        .count();
    assert_eq!(moved as u32, report.moved);
    assert_eq!(spawned as u32, report.spawned);
}
