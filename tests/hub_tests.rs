use std::cell::RefCell;
use std::rc::Rc;

use seabattle::Hub;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Ping,
    Pong,
}

#[test]
fn test_notify_in_subscription_order() {
    let hub: Hub<Event, u32> = Hub::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    for tag in ["a", "b", "c"] {
        let log = Rc::clone(&log);
        hub.subscribe(Event::Ping, move |n: &u32| log.borrow_mut().push((tag, *n)));
    }
    hub.notify(Event::Ping, &7);
    assert_eq!(*log.borrow(), vec![("a", 7), ("b", 7), ("c", 7)]);
}

#[test]
fn test_events_are_independent() {
    let hub: Hub<Event, ()> = Hub::new();
    let pings = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&pings);
    hub.subscribe(Event::Ping, move |_| *counter.borrow_mut() += 1);

    hub.notify(Event::Pong, &());
    assert_eq!(*pings.borrow(), 0);
    hub.notify(Event::Ping, &());
    assert_eq!(*pings.borrow(), 1);
}

#[test]
fn test_notify_without_subscribers_is_fine() {
    let hub: Hub<Event, String> = Hub::new();
    hub.notify(Event::Ping, &"nobody listens".to_string());
    assert_eq!(hub.subscriber_count(Event::Ping), 0);
}

#[test]
fn test_unsubscribe_removes_only_that_handler() {
    let hub: Hub<Event, ()> = Hub::new();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let first = {
        let calls = Rc::clone(&calls);
        hub.subscribe(Event::Ping, move |_| calls.borrow_mut().push(1))
    };
    {
        let calls = Rc::clone(&calls);
        hub.subscribe(Event::Ping, move |_| calls.borrow_mut().push(2));
    }
    hub.unsubscribe(Event::Ping, first);
    hub.notify(Event::Ping, &());
    assert_eq!(*calls.borrow(), vec![2]);

    // unknown or already removed ids are ignored
    hub.unsubscribe(Event::Ping, first);
    hub.unsubscribe(Event::Pong, first);
    assert_eq!(hub.subscriber_count(Event::Ping), 1);
}

#[test]
fn test_handler_may_unsubscribe_itself_during_dispatch() {
    let hub: Rc<Hub<Event, ()>> = Rc::new(Hub::new());
    let calls = Rc::new(RefCell::new(0));
    let id = Rc::new(RefCell::new(None));
    {
        let hub_ref = Rc::downgrade(&hub);
        let calls = Rc::clone(&calls);
        let id_ref = Rc::clone(&id);
        let sub = hub.subscribe(Event::Ping, move |_| {
            *calls.borrow_mut() += 1;
            if let (Some(hub), Some(id)) = (hub_ref.upgrade(), *id_ref.borrow()) {
                hub.unsubscribe(Event::Ping, id);
            }
        });
        *id.borrow_mut() = Some(sub);
    }
    hub.notify(Event::Ping, &());
    hub.notify(Event::Ping, &());
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn test_clear_drops_everything() {
    let hub: Hub<Event, ()> = Hub::new();
    hub.subscribe(Event::Ping, |_| {});
    hub.subscribe(Event::Pong, |_| {});
    hub.clear();
    assert_eq!(hub.subscriber_count(Event::Ping), 0);
    assert_eq!(hub.subscriber_count(Event::Pong), 0);
}
