//! Table-wide limits.

/// Hard seat bound for a table.
pub const MAX_PLAYERS: usize = 6;

/// A hand starts as soon as this many players are seated.
pub const MIN_PLAYERS: usize = 2;

/// Sealed hole cards dealt to each player.
pub const HOLE_CARDS: usize = 2;

/// Total community card slots over a full hand.
pub const COMMUNITY_CARDS: usize = 5;

/// Identity strings longer than this are truncated on the way in.
pub const MAX_ID_LENGTH: usize = 64;
