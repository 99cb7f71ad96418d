//! Table actor with single-writer command handling.

use log::{error, info};
use tokio::sync::{mpsc, oneshot};

use super::{
    config::TableConfig,
    messages::{CommandError, CommandReply, TableMessage},
};
use crate::{
    game::{
        GameError, Table,
        entities::{
            BetCommitment, Chips, GameSnapshot, PlayerId, PlayerKey, PlayerSnapshot, SealedCard,
            SeatIndex,
        },
    },
    store::{SnapshotStore, StoreError, TableRecord},
};

const INBOX_CAPACITY: usize = 64;

/// Cloneable handle for sending commands and queries to a table actor.
#[derive(Clone)]
pub struct TableHandle {
    sender: mpsc::Sender<TableMessage>,
}

impl TableHandle {
    pub async fn join(
        &self,
        player: PlayerId,
        key: PlayerKey,
    ) -> Result<GameSnapshot, CommandError> {
        self.command(|response| TableMessage::Join {
            player,
            key,
            response,
        })
        .await
    }

    pub async fn place_bet(
        &self,
        player: PlayerId,
        amount: Chips,
        commitment: BetCommitment,
    ) -> Result<GameSnapshot, CommandError> {
        self.command(|response| TableMessage::PlaceBet {
            player,
            amount,
            commitment,
            response,
        })
        .await
    }

    pub async fn fold(&self, player: PlayerId) -> Result<GameSnapshot, CommandError> {
        self.command(|response| TableMessage::Fold { player, response })
            .await
    }

    pub async fn reset(&self, caller: PlayerId) -> Result<GameSnapshot, CommandError> {
        self.command(|response| TableMessage::Reset { caller, response })
            .await
    }

    pub async fn snapshot(&self) -> Result<GameSnapshot, CommandError> {
        self.query(|response| TableMessage::GetSnapshot { response })
            .await
    }

    pub async fn player(&self, seat: SeatIndex) -> Result<Option<PlayerSnapshot>, CommandError> {
        self.query(|response| TableMessage::GetPlayer { seat, response })
            .await
    }

    pub async fn hole_cards(
        &self,
        player: PlayerId,
    ) -> Result<Option<Vec<SealedCard>>, CommandError> {
        self.query(|response| TableMessage::GetHoleCards { player, response })
            .await
    }

    pub async fn community_cards(&self) -> Result<Vec<SealedCard>, CommandError> {
        self.query(|response| TableMessage::GetCommunityCards { response })
            .await
    }

    /// Stop the actor. Queued messages ahead of this one still run.
    pub async fn close(&self) -> Result<(), CommandError> {
        self.query(|response| TableMessage::Close { response })
            .await
    }

    async fn command<F>(&self, make: F) -> Result<GameSnapshot, CommandError>
    where
        F: FnOnce(oneshot::Sender<CommandReply>) -> TableMessage,
    {
        let reply = self.query(make).await?;
        reply.map_err(CommandError::from)
    }

    async fn query<T, F>(&self, make: F) -> Result<T, CommandError>
    where
        F: FnOnce(oneshot::Sender<T>) -> TableMessage,
    {
        let (response, receiver) = oneshot::channel();
        self.sender
            .send(make(response))
            .await
            .map_err(|_| CommandError::Closed)?;
        receiver.await.map_err(|_| CommandError::Closed)
    }
}

/// Actor owning a single table aggregate.
pub struct TableActor {
    config: TableConfig,
    table: Table,
    inbox: mpsc::Receiver<TableMessage>,
    store: Option<Box<dyn SnapshotStore>>,
}

impl TableActor {
    /// Create an in-memory actor.
    pub fn new(config: TableConfig) -> (Self, TableHandle) {
        let (sender, inbox) = mpsc::channel(INBOX_CAPACITY);
        let table = Table::new(config.rules());
        let actor = Self {
            config,
            table,
            inbox,
            store: None,
        };
        (actor, TableHandle { sender })
    }

    /// Create an actor backed by a snapshot store, resuming from the last
    /// committed record if one exists.
    pub fn with_store(
        config: TableConfig,
        store: Box<dyn SnapshotStore>,
    ) -> Result<(Self, TableHandle), StoreError> {
        let (mut actor, handle) = Self::new(config);
        if let Some(record) = store.load()? {
            info!(
                "table '{}' resuming from snapshot saved at {} ({} players, {})",
                actor.config.name,
                record.saved_at,
                record.table.player_count(),
                record.table.phase(),
            );
            actor.table = record.table;
        }
        actor.store = Some(store);
        Ok((actor, handle))
    }

    /// Run the actor event loop until the handle side closes or a Close
    /// message arrives.
    pub async fn run(mut self) {
        info!("table '{}' starting", self.config.name);

        while let Some(message) = self.inbox.recv().await {
            if self.handle_message(message) {
                break;
            }
        }

        info!("table '{}' closed", self.config.name);
    }

    fn handle_message(&mut self, message: TableMessage) -> bool {
        match message {
            TableMessage::Join {
                player,
                key,
                response,
            } => {
                let result = self.apply(|table| table.join(player, key));
                let _ = response.send(result);
            }

            TableMessage::PlaceBet {
                player,
                amount,
                commitment,
                response,
            } => {
                let result = self.apply(|table| table.place_bet(&player, amount, commitment));
                let _ = response.send(result);
            }

            TableMessage::Fold { player, response } => {
                let result = self.apply(|table| table.fold(&player));
                let _ = response.send(result);
            }

            TableMessage::Reset { caller, response } => {
                let result = self.apply(|table| table.reset(&caller));
                let _ = response.send(result);
            }

            TableMessage::GetSnapshot { response } => {
                let _ = response.send(self.table.snapshot());
            }

            TableMessage::GetPlayer { seat, response } => {
                let _ = response.send(self.table.player(seat));
            }

            TableMessage::GetHoleCards { player, response } => {
                let _ = response.send(self.table.hole_cards(&player).map(<[SealedCard]>::to_vec));
            }

            TableMessage::GetCommunityCards { response } => {
                let _ = response.send(self.table.community_cards().to_vec());
            }

            TableMessage::Close { response } => {
                let _ = response.send(());
                return true;
            }
        }

        false
    }

    /// Run one command with a transactional boundary: the engine validates
    /// before mutating, and when a store is attached the whole command
    /// rolls back if the commit cannot be persisted.
    fn apply<F>(&mut self, command: F) -> CommandReply
    where
        F: FnOnce(&mut Table) -> Result<(), GameError>,
    {
        let backup = self.store.is_some().then(|| self.table.clone());

        command(&mut self.table)?;

        if let Some(store) = &self.store
            && let Err(e) = store.save(&TableRecord::new(&self.table))
        {
            error!(
                "table '{}': snapshot save failed, rolling back command: {e}",
                self.config.name
            );
            if let Some(backup) = backup {
                self.table = backup;
            }
            return Err(GameError::StorageUnavailable(e.to_string()));
        }

        for event in self.table.drain_events() {
            info!("table '{}': {event}", self.config.name);
        }
        Ok(self.table.snapshot())
    }
}
