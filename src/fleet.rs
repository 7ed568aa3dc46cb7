//! One side's roster of ships and its aggregate afloat/lost state.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::ConfigError;
use crate::hub::{Hub, SubscriptionId};
use crate::ship::{Ship, ShipEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleetEvent {
    /// Every ship of the fleet has been sunk.
    Lose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FleetUpdate {
    pub ships_afloat: usize,
    pub lost: bool,
}

#[derive(Debug)]
pub struct Fleet {
    ships: Vec<Rc<Ship>>,
    afloat: Cell<usize>,
    lost: Cell<bool>,
    hub: Hub<FleetEvent, FleetUpdate>,
}

impl Fleet {
    /// Build one ship per size, in roster order, and watch each for sinking.
    pub fn new(ship_sizes: &[usize]) -> Result<Rc<Self>, ConfigError> {
        if ship_sizes.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        let ships = ship_sizes
            .iter()
            .enumerate()
            .map(|(index, &size)| Ship::new(size).ok_or(ConfigError::ZeroSizedShip { index }))
            .collect::<Result<Vec<_>, _>>()?;

        let fleet = Rc::new(Self {
            afloat: Cell::new(ships.len()),
            lost: Cell::new(false),
            ships,
            hub: Hub::new(),
        });
        for ship in &fleet.ships {
            let weak = Rc::downgrade(&fleet);
            ship.subscribe(ShipEvent::Sunk, move |_| {
                if let Some(fleet) = weak.upgrade() {
                    fleet.record_sunk();
                }
            });
        }
        Ok(fleet)
    }

    fn record_sunk(&self) {
        if self.lost.get() {
            return;
        }
        let afloat = self.afloat.get().saturating_sub(1);
        self.afloat.set(afloat);
        log::debug!("{} ship(s) afloat", afloat);
        if afloat == 0 {
            self.lost.set(true);
            self.hub.notify(
                FleetEvent::Lose,
                &FleetUpdate {
                    ships_afloat: 0,
                    lost: true,
                },
            );
        }
    }

    pub fn ships(&self) -> &[Rc<Ship>] {
        &self.ships
    }

    pub fn ship(&self, index: usize) -> Option<&Rc<Ship>> {
        self.ships.get(index)
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Sizes in roster order.
    pub fn roster(&self) -> Vec<usize> {
        self.ships.iter().map(|s| s.size()).collect()
    }

    pub fn ships_afloat(&self) -> usize {
        self.afloat.get()
    }

    pub fn is_lost(&self) -> bool {
        self.lost.get()
    }

    pub fn subscribe<F>(&self, event: FleetEvent, handler: F) -> SubscriptionId
    where
        F: Fn(&FleetUpdate) + 'static,
    {
        self.hub.subscribe(event, handler)
    }

    pub fn unsubscribe(&self, event: FleetEvent, id: SubscriptionId) {
        self.hub.unsubscribe(event, id)
    }
}
