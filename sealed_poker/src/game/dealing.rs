//! Card-sealing stub.
//!
//! Produces the opaque per-player and community card tokens the table
//! stores. Each token is a digest over a domain tag, the recipient's key
//! material (or board slot) and a fresh nonce, which makes it unlinkable
//! and unique but carries no recoverable card value. A verifiable-shuffle
//! protocol would replace this module wholesale; the rest of the engine
//! only sees [`SealedCard`] and stays untouched by that swap.

use rand::Rng;
use sha2::{Digest, Sha256};

use super::constants::HOLE_CARDS;
use super::entities::{BettingRound, PlayerKey, SealedCard};

fn seal(tag: &[u8], material: &[u8], nonce: u64) -> SealedCard {
    let mut hasher = Sha256::new();
    hasher.update(tag);
    hasher.update(material);
    hasher.update(nonce.to_be_bytes());
    let ciphertext: [u8; 32] = hasher.finalize().into();
    SealedCard { ciphertext, nonce }
}

/// Seal a pair of hole cards tagged with the player's key material.
pub fn seal_hole_cards(key: &PlayerKey) -> [SealedCard; HOLE_CARDS] {
    let mut rng = rand::rng();
    std::array::from_fn(|slot| {
        let mut material = key.as_bytes().to_vec();
        material.push(slot as u8);
        seal(b"hole", &material, rng.random())
    })
}

/// Seal one community card for the given board slot.
pub fn seal_community_card(round: BettingRound, slot: usize) -> SealedCard {
    let mut rng = rand::rng();
    seal(
        b"community",
        &[round.community_cards() as u8, slot as u8],
        rng.random(),
    )
}
