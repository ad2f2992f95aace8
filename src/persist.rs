//! Serialization helpers for the storage boundary.
//!
//! The crate never owns storage; hosts hand bytes in and out. The rule
//! at that boundary is that corrupted or missing data falls back to a
//! fresh default instead of failing, so a damaged save never locks a
//! player out.

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encode a value for storage.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, bincode::Error> {
    bincode::serialize(value)
}

/// Decode stored bytes, falling back to `T::default()` when the bytes
/// are absent or corrupted.
#[must_use]
pub fn decode_or_default<T: DeserializeOwned + Default>(bytes: Option<&[u8]>) -> T {
    decode_or(bytes, T::default())
}

/// Decode stored bytes, falling back to `fallback` when the bytes are
/// absent or corrupted.
#[must_use]
pub fn decode_or<T: DeserializeOwned>(bytes: Option<&[u8]>, fallback: T) -> T {
    let Some(bytes) = bytes else {
        return fallback;
    };
    match bincode::deserialize(bytes) {
        Ok(value) => value,
        Err(err) => {
            warn!("discarding corrupted stored value: {err}");
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wager::{PlayerProgression, PlayerWallet, STARTING_COINS};

    #[test]
    fn test_encode_decode_round_trip() {
        let wallet = PlayerWallet::new().add_coins(123);
        let bytes = encode(&wallet).unwrap();
        let back: PlayerWallet = decode_or_default(Some(&bytes));
        assert_eq!(back, wallet);
    }

    #[test]
    fn test_missing_bytes_fall_back_to_default() {
        let wallet: PlayerWallet = decode_or_default(None);
        assert_eq!(wallet.coins, STARTING_COINS);

        let progression: PlayerProgression = decode_or_default(None);
        assert_eq!(progression, PlayerProgression::new());
    }

    #[test]
    fn test_corrupted_bytes_fall_back() {
        let garbage = [0xff, 0x13, 0x37];
        let wallet: PlayerWallet = decode_or_default(Some(&garbage));
        assert_eq!(wallet, PlayerWallet::new());

        let custom = PlayerWallet { coins: 55, ..PlayerWallet::new() };
        let wallet = decode_or(Some(&garbage), custom);
        assert_eq!(wallet.coins, 55);
    }
}
