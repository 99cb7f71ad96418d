use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::constants;

/// Type alias for chip amounts, denominated in the table's smallest unit.
pub type Chips = u64;

/// Type alias for seat positions at the table. Seat order is join order.
pub type SeatIndex = usize;

/// A player identity. Identities are compared case-insensitively, so the
/// string is normalized on the way in.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(s: &str) -> Self {
        let mut id: String = s.trim().chars().map(|c| c.to_ascii_lowercase()).collect();
        id.truncate(constants::MAX_ID_LENGTH);
        Self(id)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

/// Per-player key material used to tag that player's sealed cards. The
/// engine stores and echoes it, nothing more.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerKey(String);

impl PlayerKey {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for PlayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An opaque committed-bet token supplied by the caller alongside the
/// clear bet amount. Never decrypted or interpreted here.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BetCommitment(String);

impl BetCommitment {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl fmt::Display for BetCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A sealed card token: a 32-byte ciphertext placeholder plus the nonce it
/// was sealed with. There is no decrypt operation in this engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SealedCard {
    pub ciphertext: [u8; 32],
    pub nonce: u64,
}

impl fmt::Display for SealedCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Log-friendly abbreviation of the full 64 hex chars.
        write!(f, "0x{}..", &hex::encode(self.ciphertext)[..8])
    }
}

#[derive(Deserialize, Serialize)]
struct SealedCardRepr {
    ciphertext: String,
    nonce: u64,
}

impl Serialize for SealedCard {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        SealedCardRepr {
            ciphertext: hex::encode(self.ciphertext),
            nonce: self.nonce,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SealedCard {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = SealedCardRepr::deserialize(deserializer)?;
        let bytes = hex::decode(&repr.ciphertext).map_err(serde::de::Error::custom)?;
        let ciphertext: [u8; 32] = bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("sealed card ciphertext must be 32 bytes"))?;
        Ok(Self {
            ciphertext,
            nonce: repr.nonce,
        })
    }
}

/// Lifecycle phase of the table.
///
/// `Dealing` and `Revealing` never rest between commands; the table passes
/// through them within a single command and lands on `Betting` or
/// `Finished`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    WaitingForPlayers,
    Dealing,
    Betting,
    Revealing,
    Finished,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::WaitingForPlayers => "waiting for players",
            Self::Dealing => "dealing",
            Self::Betting => "betting",
            Self::Revealing => "revealing",
            Self::Finished => "finished",
        };
        write!(f, "{repr}")
    }
}

/// One of the four pot-building rounds.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BettingRound {
    PreFlop,
    Flop,
    Turn,
    River,
}

impl BettingRound {
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::PreFlop => Some(Self::Flop),
            Self::Flop => Some(Self::Turn),
            Self::Turn => Some(Self::River),
            Self::River => None,
        }
    }

    /// Cumulative community cards on the board once this round is live.
    #[must_use]
    pub const fn community_cards(self) -> usize {
        match self {
            Self::PreFlop => 0,
            Self::Flop => 3,
            Self::Turn => 4,
            Self::River => 5,
        }
    }
}

impl fmt::Display for BettingRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::PreFlop => "pre-flop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
        };
        write!(f, "{repr}")
    }
}

/// A seated player.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub key: PlayerKey,
    pub is_active: bool,
    /// Monotonic within a hand; only a table reset clears it.
    pub has_folded: bool,
    pub commitment: Option<BetCommitment>,
    pub hole_cards: Vec<SealedCard>,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, key: PlayerKey) -> Self {
        Self {
            id,
            key,
            is_active: true,
            has_folded: false,
            commitment: None,
            hole_cards: Vec::with_capacity(constants::HOLE_CARDS),
        }
    }

    pub fn fold(&mut self) {
        self.has_folded = true;
        self.is_active = false;
    }
}

/// Public view of one player. Hole cards are deliberately absent; players
/// fetch their own sealed cards through a separate query.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PlayerSnapshot {
    pub seat: SeatIndex,
    pub id: PlayerId,
    pub key: PlayerKey,
    pub is_active: bool,
    pub has_folded: bool,
    pub commitment: Option<BetCommitment>,
}

/// Full public view of the table, consistent with the last committed
/// command.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub betting_round: BettingRound,
    pub player_count: usize,
    pub pot: Chips,
    pub current_bet: Chips,
    pub current_player: Option<SeatIndex>,
    pub dealer_position: SeatIndex,
    pub community_revealed: usize,
    pub players: Vec<PlayerSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_id_normalizes_case_and_whitespace() {
        assert_eq!(PlayerId::new("0xAbCd"), PlayerId::new(" 0xabcd "));
    }

    #[test]
    fn player_id_truncates_long_input() {
        let long = "a".repeat(3 * constants::MAX_ID_LENGTH);
        assert_eq!(PlayerId::new(&long).as_str().len(), constants::MAX_ID_LENGTH);
    }

    #[test]
    fn betting_rounds_step_through_the_board() {
        let mut round = BettingRound::PreFlop;
        let mut counts = vec![round.community_cards()];
        while let Some(next) = round.next() {
            round = next;
            counts.push(round.community_cards());
        }
        assert_eq!(counts, vec![0, 3, 4, 5]);
        assert_eq!(round.next(), None);
    }

    #[test]
    fn sealed_card_serde_round_trips_as_hex() {
        let card = SealedCard {
            ciphertext: [7u8; 32],
            nonce: 42,
        };
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains(&hex::encode([7u8; 32])));
        let back: SealedCard = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }

    #[test]
    fn sealed_card_rejects_short_ciphertext() {
        let json = r#"{"ciphertext":"0707","nonce":1}"#;
        assert!(serde_json::from_str::<SealedCard>(json).is_err());
    }
}
