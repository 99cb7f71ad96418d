//! Poker table engine - aggregate, entities, and dealing stub.
//!
//! This module provides the single-table coordinator:
//! - Table aggregate with join/bet/fold/reset commands
//! - Turn order and betting-round bookkeeping
//! - Sealed-card placeholders in place of real dealing
//! - Event generation and snapshots

pub mod constants;
pub mod dealing;
pub mod entities;

mod state_machine;

pub use state_machine::{
    GameError, GameEvent, SeatOrderSelector, Table, TableRules, WinnerSelector,
};
