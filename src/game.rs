//! Match coordinator: two boards, two fleets, turn alternation and the
//! adversary's shot policy.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::board::{Board, ShotOutcome};
use crate::cell::Coord;
use crate::config::MatchConfig;
use crate::error::{BoardError, MatchError};
use crate::fleet::{Fleet, FleetEvent};
use crate::hub::{Hub, SubscriptionId};
use crate::player::{AiPlayer, Player};
use crate::ship::Orientation;

/// Current status of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchState {
    /// The player is arranging their fleet.
    Setup,
    InProgress,
    PlayerWon,
    PlayerLost,
}

impl MatchState {
    pub fn is_over(self) -> bool {
        matches!(self, MatchState::PlayerWon | MatchState::PlayerLost)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEvent {
    /// Payload is the new state.
    StateChanged,
}

/// Per-side shot counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub shots: usize,
    pub hits: usize,
    pub ships_sunk: usize,
}

impl Tally {
    fn record(&mut self, outcome: ShotOutcome) {
        self.shots += 1;
        match outcome {
            ShotOutcome::Miss => {}
            ShotOutcome::Hit => self.hits += 1,
            ShotOutcome::Sunk { .. } => {
                self.hits += 1;
                self.ships_sunk += 1;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotReport {
    pub coord: Coord,
    pub outcome: ShotOutcome,
}

/// What happened during one [`Match::play_turn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    /// `None` when the player fired at an already-hit cell.
    pub player: Option<ShotReport>,
    /// `None` when the adversary did not get to shoot.
    pub adversary: Option<ShotReport>,
}

struct Status {
    state: Cell<MatchState>,
    hub: Hub<MatchEvent, MatchState>,
}

impl Status {
    fn transition(&self, to: MatchState) {
        let from = self.state.replace(to);
        if from != to {
            log::info!("match state {:?} -> {:?}", from, to);
            self.hub.notify(MatchEvent::StateChanged, &to);
        }
    }

    /// Terminal transitions only happen from `InProgress`.
    fn finish(&self, to: MatchState) {
        if self.state.get() == MatchState::InProgress {
            self.transition(to);
        }
    }
}

pub struct Match {
    config: MatchConfig,
    player_board: Board,
    adversary_board: Board,
    player_fleet: Rc<Fleet>,
    adversary_fleet: Rc<Fleet>,
    adversary: Box<dyn Player>,
    rng: SmallRng,
    status: Rc<Status>,
    player_tally: Tally,
    adversary_tally: Tally,
}

impl Match {
    /// Create a match in `Setup`. The adversary lays out its fleet through
    /// its strategy; the player's fleet starts unplaced.
    pub fn new(
        config: MatchConfig,
        mut adversary: Box<dyn Player>,
        mut rng: SmallRng,
    ) -> Result<Self, MatchError> {
        config.validate()?;
        let player_board = Board::new(config.rows, config.cols);
        let mut adversary_board = Board::new(config.rows, config.cols);
        let player_fleet = Fleet::new(&config.ship_sizes)?;
        let adversary_fleet = Fleet::new(&config.ship_sizes)?;
        adversary.place_fleet(
            &mut rng,
            &mut adversary_board,
            &adversary_fleet,
            config.placement_attempts,
        )?;

        let status = Rc::new(Status {
            state: Cell::new(MatchState::Setup),
            hub: Hub::new(),
        });
        watch_fleet(&status, &adversary_fleet, MatchState::PlayerWon);
        watch_fleet(&status, &player_fleet, MatchState::PlayerLost);

        Ok(Self {
            config,
            player_board,
            adversary_board,
            player_fleet,
            adversary_fleet,
            adversary,
            rng,
            status,
            player_tally: Tally::default(),
            adversary_tally: Tally::default(),
        })
    }

    /// Match against the random AI with a reproducible RNG.
    pub fn with_seed(config: MatchConfig, seed: u64) -> Result<Self, MatchError> {
        Self::new(config, Box::new(AiPlayer::new()), SmallRng::seed_from_u64(seed))
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn state(&self) -> MatchState {
        self.status.state.get()
    }

    pub fn is_over(&self) -> bool {
        self.state().is_over()
    }

    pub fn player_board(&self) -> &Board {
        &self.player_board
    }

    pub fn adversary_board(&self) -> &Board {
        &self.adversary_board
    }

    /// Mutable access for attaching presentation observers.
    pub fn player_board_mut(&mut self) -> &mut Board {
        &mut self.player_board
    }

    pub fn adversary_board_mut(&mut self) -> &mut Board {
        &mut self.adversary_board
    }

    pub fn player_fleet(&self) -> &Rc<Fleet> {
        &self.player_fleet
    }

    pub fn adversary_fleet(&self) -> &Rc<Fleet> {
        &self.adversary_fleet
    }

    pub fn player_tally(&self) -> Tally {
        self.player_tally
    }

    pub fn adversary_tally(&self) -> Tally {
        self.adversary_tally
    }

    pub fn subscribe<F>(&self, event: MatchEvent, handler: F) -> SubscriptionId
    where
        F: Fn(&MatchState) + 'static,
    {
        self.status.hub.subscribe(event, handler)
    }

    pub fn unsubscribe(&self, event: MatchEvent, id: SubscriptionId) {
        self.status.hub.unsubscribe(event, id)
    }

    fn require(&self, state: MatchState) -> Result<(), MatchError> {
        match (state, self.state()) {
            (a, b) if a == b => Ok(()),
            (MatchState::Setup, _) => Err(MatchError::NotInSetup),
            _ => Err(MatchError::NotInProgress),
        }
    }

    /// Number of player ships currently on the board.
    pub fn player_ships_placed(&self) -> usize {
        self.player_fleet
            .ships()
            .iter()
            .filter(|s| self.player_board.is_placed(s))
            .count()
    }

    /// Preview query for drag placement; does not change any state.
    pub fn can_place_player_ship(
        &self,
        index: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<Vec<Coord>, MatchError> {
        let ship = self.player_fleet.ship(index).ok_or(MatchError::UnknownShip(index))?;
        Ok(self.player_board.can_place(row, col, ship.size(), orientation)?)
    }

    pub fn place_player_ship(
        &mut self,
        index: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<Vec<Coord>, MatchError> {
        self.require(MatchState::Setup)?;
        let ship = Rc::clone(self.player_fleet.ship(index).ok_or(MatchError::UnknownShip(index))?);
        let cells = self.player_board.can_place(row, col, ship.size(), orientation)?;
        self.player_board.place(&ship, &cells)?;
        Ok(cells)
    }

    pub fn remove_player_ship(&mut self, index: usize) -> Result<Vec<Coord>, MatchError> {
        self.require(MatchState::Setup)?;
        let ship = Rc::clone(self.player_fleet.ship(index).ok_or(MatchError::UnknownShip(index))?);
        Ok(self.player_board.remove(&ship)?)
    }

    /// Discard the player's fleet and layout and place a fresh fleet with
    /// the same roster at random. The adversary and the tallies are kept.
    pub fn randomize_player_fleet(&mut self) -> Result<(), MatchError> {
        self.require(MatchState::Setup)?;
        self.player_board.clear();
        let fleet = Fleet::new(&self.config.ship_sizes)?;
        watch_fleet(&self.status, &fleet, MatchState::PlayerLost);
        self.player_fleet = fleet;
        self.player_board.place_randomly(
            &mut self.rng,
            &self.player_fleet,
            self.config.placement_attempts,
        )?;
        Ok(())
    }

    /// Leave `Setup` once every player ship is on the board.
    pub fn start(&mut self) -> Result<(), MatchError> {
        self.require(MatchState::Setup)?;
        let placed = self.player_ships_placed();
        let total = self.player_fleet.len();
        if placed < total {
            return Err(MatchError::FleetIncomplete { placed, total });
        }
        self.status.transition(MatchState::InProgress);
        Ok(())
    }

    /// Player fires at the adversary board. Firing at an already-hit cell is
    /// a no-op reported as `Ok(None)`.
    pub fn fire(&mut self, row: usize, col: usize) -> Result<Option<ShotReport>, MatchError> {
        self.require(MatchState::InProgress)?;
        let report = shoot(&mut self.adversary_board, Coord::new(row, col))?;
        if let Some(report) = report {
            self.player_tally.record(report.outcome);
        }
        Ok(report)
    }

    /// Let the adversary strategy pick a cell on the player's board and fire.
    pub fn adversary_shot(&mut self) -> Result<Option<ShotReport>, MatchError> {
        self.require(MatchState::InProgress)?;
        let Some(target) = self.adversary.select_target(&mut self.rng, &self.player_board) else {
            return Ok(None);
        };
        let report = shoot(&mut self.player_board, target)?;
        if let Some(report) = report {
            self.adversary_tally.record(report.outcome);
            self.adversary.handle_shot_result(report.coord, report.outcome);
        }
        Ok(report)
    }

    /// Random artificial delay before the adversary answers.
    pub fn adversary_delay(&mut self) -> Duration {
        if self.config.ai_delay_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(self.rng.random_range(0..self.config.ai_delay_ms))
    }

    /// One full turn: the player's shot, then, if it landed on a fresh cell
    /// and the match goes on, the adversary's delayed answer.
    pub async fn play_turn(&mut self, row: usize, col: usize) -> Result<TurnReport, MatchError> {
        let player = self.fire(row, col)?;
        let mut adversary = None;
        if player.is_some() && self.state() == MatchState::InProgress {
            let delay = self.adversary_delay();
            tokio::time::sleep(delay).await;
            adversary = self.adversary_shot()?;
        }
        Ok(TurnReport { player, adversary })
    }
}

fn watch_fleet(status: &Rc<Status>, fleet: &Fleet, outcome: MatchState) {
    let status = Rc::downgrade(status);
    fleet.subscribe(FleetEvent::Lose, move |_| {
        if let Some(status) = status.upgrade() {
            status.finish(outcome);
        }
    });
}

fn shoot(board: &mut Board, coord: Coord) -> Result<Option<ShotReport>, BoardError> {
    match board.fire(coord.row, coord.col) {
        Ok(outcome) => {
            log::debug!("shot at {}: {:?}", coord, outcome);
            Ok(Some(ShotReport { coord, outcome }))
        }
        Err(BoardError::DoubleHit { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}
