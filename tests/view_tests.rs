use seabattle::{Board, BoardView, Coord, Mark, Orientation, Ship};

#[test]
fn test_marks_follow_notifications() {
    let mut board = Board::new(4, 4);
    let view = BoardView::attach(&mut board, true);
    let ship = Ship::new(2).unwrap();
    let cells = board.can_place(0, 0, 2, Orientation::Horizontal).unwrap();
    board.place(&ship, &cells).unwrap();

    board.fire(3, 3).unwrap();
    board.fire(0, 0).unwrap();
    assert_eq!(view.mark(Coord::new(3, 3)), Mark::Water);
    assert_eq!(view.mark(Coord::new(0, 0)), Mark::Hit);
    assert_eq!(view.mark(Coord::new(0, 1)), Mark::Unknown);

    board.fire(0, 1).unwrap();
    assert_eq!(view.mark(Coord::new(0, 0)), Mark::Sunk);
    assert_eq!(view.mark(Coord::new(0, 1)), Mark::Sunk);
}

#[test]
fn test_view_attached_after_placement_keeps_sunk() {
    let mut board = Board::new(3, 3);
    let ship = Ship::new(1).unwrap();
    let cells = board.can_place(1, 1, 1, Orientation::Horizontal).unwrap();
    board.place(&ship, &cells).unwrap();
    let view = BoardView::attach(&mut board, false);
    board.fire(1, 1).unwrap();
    assert_eq!(view.mark(Coord::new(1, 1)), Mark::Sunk);
}

#[test]
fn test_render_text() {
    let mut board = Board::new(3, 3);
    let own = BoardView::attach(&mut board, true);
    let ship = Ship::new(2).unwrap();
    let cells = board.can_place(0, 0, 2, Orientation::Vertical).unwrap();
    board.place(&ship, &cells).unwrap();
    board.fire(0, 2).unwrap();

    let text = own.to_text(&board, &[Coord::new(2, 2)]);
    let expected = "    A B C\n 1  # ~ o\n 2  # ~ ~\n 3  ~ ~ +\n";
    assert_eq!(text, expected);

    let hidden = BoardView::attach(&mut board, false);
    let text = hidden.to_text(&board, &[]);
    assert!(!text.contains('#'));
}

#[test]
fn test_reset_forgets_marks_and_survives_clear() {
    let mut board = Board::new(2, 2);
    let view = BoardView::attach(&mut board, true);
    board.fire(0, 0).unwrap();
    board.clear();
    view.reset();
    assert_eq!(view.mark(Coord::new(0, 0)), Mark::Unknown);
    board.fire(1, 1).unwrap();
    assert_eq!(view.mark(Coord::new(1, 1)), Mark::Water);
}

#[test]
fn test_mark_outside_the_grid_is_unknown() {
    let mut board = Board::new(3, 10);
    let view = BoardView::attach(&mut board, false);
    board.fire(1, 2).unwrap();
    assert_eq!(view.mark(Coord::new(1, 2)), Mark::Water);
    assert_eq!(view.mark(Coord::new(0, 12)), Mark::Unknown);
    assert_eq!(view.mark(Coord::new(5, 0)), Mark::Unknown);
}
