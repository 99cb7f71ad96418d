//! Table actor message types.

use thiserror::Error;
use tokio::sync::oneshot;

use crate::game::{
    GameError,
    entities::{
        BetCommitment, Chips, GameSnapshot, PlayerId, PlayerKey, PlayerSnapshot, SealedCard,
        SeatIndex,
    },
};

/// What a command comes back with inside the actor: the snapshot as of
/// the command's commit, or the rejection.
pub type CommandReply = Result<GameSnapshot, GameError>;

/// Command failure as seen through a [`TableHandle`]: either the engine
/// rejected it, or the actor is gone.
///
/// [`TableHandle`]: super::TableHandle
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("table is closed")]
    Closed,
}

/// Messages that can be sent to a TableActor.
#[derive(Debug)]
pub enum TableMessage {
    /// Seat a player.
    Join {
        player: PlayerId,
        key: PlayerKey,
        response: oneshot::Sender<CommandReply>,
    },

    /// Put chips in the pot with an opaque commitment attached.
    PlaceBet {
        player: PlayerId,
        amount: Chips,
        commitment: BetCommitment,
        response: oneshot::Sender<CommandReply>,
    },

    /// Forfeit the hand.
    Fold {
        player: PlayerId,
        response: oneshot::Sender<CommandReply>,
    },

    /// Owner-gated reset of a finished game.
    Reset {
        caller: PlayerId,
        response: oneshot::Sender<CommandReply>,
    },

    /// Full table snapshot.
    GetSnapshot {
        response: oneshot::Sender<GameSnapshot>,
    },

    /// One player by seat index.
    GetPlayer {
        seat: SeatIndex,
        response: oneshot::Sender<Option<PlayerSnapshot>>,
    },

    /// A player's own sealed hole cards.
    GetHoleCards {
        player: PlayerId,
        response: oneshot::Sender<Option<Vec<SealedCard>>>,
    },

    /// Revealed community card tokens.
    GetCommunityCards {
        response: oneshot::Sender<Vec<SealedCard>>,
    },

    /// Stop the actor.
    Close { response: oneshot::Sender<()> },
}
