//! Table module providing the async single-writer boundary.
//!
//! This module implements:
//! - TableActor: async actor owning the table aggregate
//! - Message-based communication with tokio channels
//! - Table configuration and lifecycle management
//!
//! ## Architecture
//!
//! The actor runs in its own tokio task with an mpsc inbox and answers
//! each message over a oneshot channel. Commands therefore execute one at
//! a time, to completion, which is the whole concurrency story: no locks,
//! no partially applied commands visible anywhere.
//!
//! ## Example
//!
//! ```
//! use sealed_poker::table::{TableActor, TableConfig};
//! use sealed_poker::entities::{PlayerId, PlayerKey};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let config = TableConfig::new("demo", PlayerId::new("0xowner"));
//!     let (actor, handle) = TableActor::new(config);
//!     tokio::spawn(actor.run());
//!
//!     let snapshot = handle
//!         .join(PlayerId::new("0xa"), PlayerKey::new("key-a"))
//!         .await
//!         .unwrap();
//!     assert_eq!(snapshot.player_count, 1);
//! }
//! ```

pub mod actor;
pub mod config;
pub mod messages;

pub use actor::{TableActor, TableHandle};
pub use config::TableConfig;
pub use messages::{CommandError, TableMessage};
