//! Table aggregate and betting engine.
//!
//! All state mutation goes through the command methods on [`Table`]. Each
//! command checks every precondition before touching any field, so a
//! rejected command leaves the table exactly as it found it.

use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, VecDeque},
    fmt,
    sync::Arc,
};
use thiserror::Error;

use super::constants::{MAX_PLAYERS, MIN_PLAYERS};
use super::dealing;
use super::entities::{
    BetCommitment, BettingRound, Chips, GamePhase, GameSnapshot, Player, PlayerId, PlayerKey,
    PlayerSnapshot, SealedCard, SeatIndex,
};

/// Errors returned by table commands. All are caller-input failures,
/// rejected synchronously; none are fatal to the table.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("player already in game")]
    DuplicateIdentity,
    #[error("game is full")]
    TableFull,
    #[error("not your turn")]
    NotYourTurn,
    #[error("bet must cover the current bet")]
    InsufficientValue,
    #[error("only the table owner can do that")]
    Unauthorized,
    #[error("game not finished")]
    GameNotFinished,
    #[error("action not allowed while {0}")]
    WrongState(GamePhase),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

/// Events that occur during gameplay.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum GameEvent {
    PlayerJoined(PlayerId),
    HoleCardsDealt(PlayerId),
    BetPlaced(PlayerId, Chips),
    RoundAdvanced(BettingRound),
    CommunityRevealed(usize),
    PlayerFolded(PlayerId),
    PotAwarded(PlayerId, Chips),
    HandFinished,
    TableReset,
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::PlayerJoined(id) => format!("{id} joined the table"),
            Self::HoleCardsDealt(id) => format!("{id} was dealt sealed hole cards"),
            Self::BetPlaced(id, amount) => format!("{id} bet {amount}"),
            Self::RoundAdvanced(round) => format!("betting moved to the {round}"),
            Self::CommunityRevealed(count) => format!("{count} community cards on the board"),
            Self::PlayerFolded(id) => format!("{id} folded"),
            Self::PotAwarded(id, amount) => format!("{id} won the {amount} pot"),
            Self::HandFinished => "the hand is over".to_string(),
            Self::TableReset => "the table was reset".to_string(),
        };
        write!(f, "{repr}")
    }
}

/// Decides which active player takes the pot at showdown.
///
/// Real hand comparison needs the cleartext cards and lives outside this
/// engine; implementations only ever see sealed state.
pub trait WinnerSelector: fmt::Debug + Send + Sync {
    fn select(&self, players: &[Player]) -> Option<PlayerId>;
}

/// Deterministic placeholder selector: the first still-active seat wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct SeatOrderSelector;

impl WinnerSelector for SeatOrderSelector {
    fn select(&self, players: &[Player]) -> Option<PlayerId> {
        players.iter().find(|p| p.is_active).map(|p| p.id.clone())
    }
}

fn default_selector() -> Arc<dyn WinnerSelector> {
    Arc::new(SeatOrderSelector)
}

/// Table configuration fixed at creation.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TableRules {
    /// Privileged identity permitted to reset a finished game.
    pub owner: PlayerId,
    pub max_players: usize,
    pub min_players: usize,
}

impl TableRules {
    #[must_use]
    pub fn new(owner: PlayerId) -> Self {
        Self {
            owner,
            max_players: MAX_PLAYERS,
            min_players: MIN_PLAYERS,
        }
    }
}

/// A poker table: one game instance and everything it owns.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Table {
    rules: TableRules,
    phase: GamePhase,
    /// Join order is seat order.
    players: Vec<Player>,
    pot: Chips,
    current_bet: Chips,
    /// Some iff `phase == Betting`, and always an active seat.
    current_player: Option<SeatIndex>,
    dealer_position: SeatIndex,
    betting_round: BettingRound,
    /// Chips each seat has put up this round. Cleared when the round
    /// advances.
    round_bets: HashMap<SeatIndex, Chips>,
    community: Vec<SealedCard>,
    #[serde(skip)]
    events: VecDeque<GameEvent>,
    #[serde(skip, default = "default_selector")]
    selector: Arc<dyn WinnerSelector>,
}

impl Table {
    #[must_use]
    pub fn new(rules: TableRules) -> Self {
        Self {
            rules,
            phase: GamePhase::WaitingForPlayers,
            players: Vec::with_capacity(MAX_PLAYERS),
            pot: 0,
            current_bet: 0,
            current_player: None,
            dealer_position: 0,
            betting_round: BettingRound::PreFlop,
            round_bets: HashMap::with_capacity(MAX_PLAYERS),
            community: Vec::with_capacity(5),
            events: VecDeque::new(),
            selector: default_selector(),
        }
    }

    #[must_use]
    pub fn with_selector(mut self, selector: Arc<dyn WinnerSelector>) -> Self {
        self.selector = selector;
        self
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn pot(&self) -> Chips {
        self.pot
    }

    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }

    pub fn current_player(&self) -> Option<SeatIndex> {
        self.current_player
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, seat: SeatIndex) -> Option<PlayerSnapshot> {
        self.players.get(seat).map(|p| snapshot_player(seat, p))
    }

    /// A player's own sealed hole cards, once dealt.
    pub fn hole_cards(&self, id: &PlayerId) -> Option<&[SealedCard]> {
        self.players
            .iter()
            .find(|p| p.id == *id)
            .filter(|p| !p.hole_cards.is_empty())
            .map(|p| p.hole_cards.as_slice())
    }

    /// Revealed community card tokens, in board order.
    pub fn community_cards(&self) -> &[SealedCard] {
        &self.community
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            betting_round: self.betting_round,
            player_count: self.players.len(),
            pot: self.pot,
            current_bet: self.current_bet,
            current_player: self.current_player,
            dealer_position: self.dealer_position,
            community_revealed: self.community.len(),
            players: self
                .players
                .iter()
                .enumerate()
                .map(|(seat, p)| snapshot_player(seat, p))
                .collect(),
        }
    }

    pub fn drain_events(&mut self) -> VecDeque<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Seat a new player.
    ///
    /// Reaching the minimum seat count starts the hand immediately; a
    /// player joining a hand already underway is dealt in on the spot and
    /// owes the current bet when their turn comes around.
    pub fn join(&mut self, id: PlayerId, key: PlayerKey) -> Result<(), GameError> {
        match self.phase {
            GamePhase::WaitingForPlayers | GamePhase::Betting => {}
            phase => return Err(GameError::WrongState(phase)),
        }
        if self.players.iter().any(|p| p.id == id) {
            return Err(GameError::DuplicateIdentity);
        }
        if self.players.len() >= self.rules.max_players {
            return Err(GameError::TableFull);
        }

        let seat = self.players.len();
        self.players.push(Player::new(id.clone(), key));
        self.push_event(GameEvent::PlayerJoined(id));
        match self.phase {
            GamePhase::WaitingForPlayers if self.players.len() >= self.rules.min_players => {
                self.begin_hand();
            }
            GamePhase::Betting => self.deal_to(seat),
            _ => {}
        }
        Ok(())
    }

    /// Put up `amount` chips with an opaque commitment attached.
    ///
    /// The attached amount must cover the table's current bet in full;
    /// anything beyond it raises the bar for everyone else.
    pub fn place_bet(
        &mut self,
        id: &PlayerId,
        amount: Chips,
        commitment: BetCommitment,
    ) -> Result<(), GameError> {
        let seat = self.expect_turn(id)?;
        if amount < self.current_bet {
            return Err(GameError::InsufficientValue);
        }

        self.pot += amount;
        self.current_bet = self.current_bet.max(amount);
        self.round_bets.insert(seat, amount);
        self.players[seat].commitment = Some(commitment);
        self.push_event(GameEvent::BetPlaced(id.clone(), amount));
        self.advance_turn_from(seat);
        Ok(())
    }

    /// Forfeit the hand.
    pub fn fold(&mut self, id: &PlayerId) -> Result<(), GameError> {
        let seat = self.expect_turn(id)?;

        self.players[seat].fold();
        self.push_event(GameEvent::PlayerFolded(id.clone()));

        let active = self.players.iter().filter(|p| p.is_active).count();
        if active == 1 {
            let winner = self
                .players
                .iter()
                .find(|p| p.is_active)
                .map(|p| p.id.clone());
            self.finish_hand(winner);
        } else {
            self.advance_turn_from(seat);
        }
        Ok(())
    }

    /// Clear the table for a fresh hand. Owner-only, and only once the
    /// current game is finished.
    pub fn reset(&mut self, caller: &PlayerId) -> Result<(), GameError> {
        if *caller != self.rules.owner {
            return Err(GameError::Unauthorized);
        }
        if self.phase != GamePhase::Finished {
            return Err(GameError::GameNotFinished);
        }

        self.players.clear();
        self.pot = 0;
        self.current_bet = 0;
        self.current_player = None;
        self.betting_round = BettingRound::PreFlop;
        self.round_bets.clear();
        self.community.clear();
        self.dealer_position = (self.dealer_position + 1) % self.rules.max_players;
        self.phase = GamePhase::WaitingForPlayers;
        self.push_event(GameEvent::TableReset);
        Ok(())
    }

    /// Common turn validation: betting must be live and `id` must sit at
    /// the acting seat.
    fn expect_turn(&self, id: &PlayerId) -> Result<SeatIndex, GameError> {
        if self.phase != GamePhase::Betting {
            return Err(GameError::WrongState(self.phase));
        }
        let seat = self.current_player.ok_or(GameError::NotYourTurn)?;
        if self.players.get(seat).map(|p| &p.id) != Some(id) {
            return Err(GameError::NotYourTurn);
        }
        Ok(seat)
    }

    /// WaitingForPlayers -> Dealing -> Betting, in one pass. The sealing
    /// stub has no multi-step deal to wait on, so Dealing never rests.
    fn begin_hand(&mut self) {
        self.phase = GamePhase::Dealing;
        for seat in 0..self.players.len() {
            self.deal_to(seat);
        }
        self.betting_round = BettingRound::PreFlop;
        self.current_bet = 0;
        self.round_bets.clear();
        self.current_player = Some(0);
        self.phase = GamePhase::Betting;
        debug!(
            "hand started with {} players, seat 0 to act",
            self.players.len()
        );
    }

    fn deal_to(&mut self, seat: SeatIndex) {
        let cards = dealing::seal_hole_cards(&self.players[seat].key);
        self.players[seat].hole_cards = cards.to_vec();
        self.push_event(GameEvent::HoleCardsDealt(self.players[seat].id.clone()));
    }

    /// Move the action on after the seat at `seat` acted: close out the
    /// round if every active seat has matched the current bet, otherwise
    /// pass the turn to the next active seat.
    fn advance_turn_from(&mut self, seat: SeatIndex) {
        if self.round_complete() {
            self.finish_round();
        } else if let Some(next) = self.next_active_seat(seat) {
            self.current_player = Some(next);
        }
    }

    fn round_complete(&self) -> bool {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_active)
            .all(|(seat, _)| self.round_bets.get(&seat) == Some(&self.current_bet))
    }

    fn finish_round(&mut self) {
        match self.betting_round.next() {
            Some(next) => {
                self.betting_round = next;
                self.reveal_community_to(next.community_cards());
                self.round_bets.clear();
                self.current_bet = 0;
                self.current_player = self.first_active_seat();
                self.push_event(GameEvent::RoundAdvanced(next));
            }
            None => {
                // Past the river: a momentary Revealing, then showdown.
                self.phase = GamePhase::Revealing;
                let winner = self.selector.select(&self.players);
                self.finish_hand(winner);
            }
        }
    }

    fn reveal_community_to(&mut self, total: usize) {
        while self.community.len() < total {
            let slot = self.community.len();
            self.community
                .push(dealing::seal_community_card(self.betting_round, slot));
        }
        self.push_event(GameEvent::CommunityRevealed(self.community.len()));
    }

    fn finish_hand(&mut self, winner: Option<PlayerId>) {
        self.current_player = None;
        self.phase = GamePhase::Finished;
        if let Some(id) = winner {
            self.push_event(GameEvent::PotAwarded(id, self.pot));
        }
        self.push_event(GameEvent::HandFinished);
    }

    /// Seating order starting just after `seat`, with wraparound, skipping
    /// folded players.
    fn next_active_seat(&self, seat: SeatIndex) -> Option<SeatIndex> {
        let n = self.players.len();
        if n == 0 {
            return None;
        }
        (1..=n)
            .map(|offset| (seat + offset) % n)
            .find(|&s| self.players[s].is_active)
    }

    fn first_active_seat(&self) -> Option<SeatIndex> {
        self.players.iter().position(|p| p.is_active)
    }

    fn push_event(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }
}

fn snapshot_player(seat: SeatIndex, player: &Player) -> PlayerSnapshot {
    PlayerSnapshot {
        seat,
        id: player.id.clone(),
        key: player.key.clone(),
        is_active: player.is_active,
        has_folded: player.has_folded,
        commitment: player.commitment.clone(),
    }
}
