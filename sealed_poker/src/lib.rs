//! # Sealed Poker
//!
//! A turn-based poker table engine with opaque "sealed" card and bet
//! placeholders.
//!
//! This library provides a single-table coordinator: players join seats,
//! bet in turn order across the four betting rounds, fold, and the table
//! owner resets a finished hand. Cards and bet commitments are opaque
//! tokens the engine stores and hands back but never interprets; a real
//! card-dealing/crypto service is expected to sit behind that token
//! boundary.
//!
//! ## Architecture
//!
//! - [`game`]: the table aggregate, entities, and the sealing stub. Every
//!   command validates before it mutates, so a failed command leaves no
//!   trace.
//! - [`store`]: durable table snapshots, so reads stay consistent with the
//!   last committed command across restarts.
//! - [`table`]: an async actor that owns the aggregate and serializes all
//!   commands through one inbox. At most one command is ever in flight.
//!
//! ## Example
//!
//! ```
//! use sealed_poker::{Table, TableRules};
//! use sealed_poker::entities::PlayerId;
//!
//! let owner = PlayerId::new("0xowner");
//! let table = Table::new(TableRules::new(owner));
//! assert_eq!(table.player_count(), 0);
//! ```

/// Core table logic, entities, and the card-sealing stub.
pub mod game;
pub use game::{
    GameError, GameEvent, SeatOrderSelector, Table, TableRules, WinnerSelector,
    constants::{self, MAX_PLAYERS, MIN_PLAYERS},
    entities,
};

/// Durable snapshot storage.
pub mod store;
pub use store::{JsonFileStore, SnapshotStore, StoreError, TableRecord};

/// Async actor boundary for the table.
pub mod table;
pub use table::{TableActor, TableConfig, TableHandle, messages};
