use std::cell::RefCell;
use std::rc::Rc;

use seabattle::{Cell, CellEvent, CellUpdate, Coord};

fn recorder(cell: &Cell) -> Rc<RefCell<Vec<CellUpdate>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    cell.subscribe(CellEvent::Hit, move |u| sink.borrow_mut().push(*u));
    seen
}

#[test]
fn test_new_cell_is_free() {
    let cell = Cell::new(3, 4);
    assert_eq!(cell.coord(), Coord::new(3, 4));
    assert_eq!((cell.row(), cell.col()), (3, 4));
    assert!(cell.available());
    assert!(!cell.occupies_ship());
    assert!(!cell.hit());
}

#[test]
fn test_set_hit_notifies_once() {
    let mut cell = Cell::new(1, 2);
    let seen = recorder(&cell);

    assert!(cell.set_hit());
    assert!(cell.hit());
    assert!(!cell.set_hit(), "second hit must be rejected");
    assert!(cell.hit());

    assert_eq!(
        *seen.borrow(),
        vec![CellUpdate {
            coord: Coord::new(1, 2),
            ship_present: false
        }]
    );
}

#[test]
fn test_reset_restores_state_and_drops_subscriptions() {
    let mut cell = Cell::new(0, 0);
    let seen = recorder(&cell);
    cell.set_hit();
    cell.reset();

    assert!(!cell.hit());
    assert!(cell.available());
    assert!(!cell.occupies_ship());

    cell.set_hit();
    assert_eq!(seen.borrow().len(), 1, "old subscriber must not hear the new hit");
}
