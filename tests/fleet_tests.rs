use std::cell::RefCell;
use std::rc::Rc;

use seabattle::{Board, ConfigError, Fleet, FleetEvent, Orientation};

#[test]
fn test_roster_validation() {
    assert!(matches!(Fleet::new(&[]), Err(ConfigError::EmptyRoster)));
    assert!(matches!(
        Fleet::new(&[3, 0, 2]),
        Err(ConfigError::ZeroSizedShip { index: 1 })
    ));
    let fleet = Fleet::new(&[4, 2]).unwrap();
    assert_eq!(fleet.roster(), vec![4, 2]);
    assert_eq!(fleet.len(), 2);
    assert_eq!(fleet.ships_afloat(), 2);
    assert!(!fleet.is_lost());
}

#[test]
fn test_scenario_fleet_lost_after_last_ship() {
    let mut board = Board::new(10, 10);
    let fleet = Fleet::new(&[2, 3]).unwrap();
    let loses = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&loses);
    fleet.subscribe(FleetEvent::Lose, move |u| sink.borrow_mut().push(*u));

    let small = Rc::clone(&fleet.ships()[0]);
    let big = Rc::clone(&fleet.ships()[1]);
    let cells = board.can_place(0, 0, 2, Orientation::Horizontal).unwrap();
    board.place(&small, &cells).unwrap();
    let cells = board.can_place(5, 5, 3, Orientation::Vertical).unwrap();
    board.place(&big, &cells).unwrap();

    board.fire(0, 0).unwrap();
    board.fire(0, 1).unwrap();
    assert!(small.is_sunk());
    assert_eq!(fleet.ships_afloat(), 1);
    assert!(!fleet.is_lost());
    assert!(loses.borrow().is_empty());

    board.fire(5, 5).unwrap();
    board.fire(6, 5).unwrap();
    assert_eq!(fleet.ships_afloat(), 1);
    board.fire(7, 5).unwrap();
    assert_eq!(fleet.ships_afloat(), 0);
    assert!(fleet.is_lost());
    assert_eq!(loses.borrow().len(), 1);
    assert!(loses.borrow()[0].lost);
}

#[test]
fn test_afloat_never_increases() {
    let fleet = Fleet::new(&[1, 1, 1]).unwrap();
    let mut last = fleet.ships_afloat();
    for ship in fleet.ships() {
        ship.apply_hit();
        ship.apply_hit();
        assert!(fleet.ships_afloat() < last);
        last = fleet.ships_afloat();
    }
    assert!(fleet.is_lost());
    assert_eq!(fleet.ships_afloat(), 0);
}

#[test]
fn test_unsubscribed_lose_handler_is_silent() {
    let fleet = Fleet::new(&[1]).unwrap();
    let called = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&called);
    let id = fleet.subscribe(FleetEvent::Lose, move |_| *flag.borrow_mut() = true);
    fleet.unsubscribe(FleetEvent::Lose, id);
    fleet.ships()[0].apply_hit();
    assert!(fleet.is_lost());
    assert!(!*called.borrow());
}
