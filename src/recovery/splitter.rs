// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Threshold splitting and reconstruction of wallet private keys.
//!
//! A key is split byte-by-byte: each position >= 1 gets its own fresh
//! random polynomial over GF(256), and every share carries that
//! polynomial's evaluation at the share's index. Reconstruction
//! interpolates the polynomial back at x = 0. Coefficients live only
//! for the duration of the split call.

use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::RecoveryError;
use super::field;

/// Shares required to reconstruct a key.
///
/// Reconstruction is fixed two-point interpolation; splits with more
/// shares still recover from any two of them.
pub const RECOVERY_THRESHOLD: usize = 2;

/// Shares produced by a default split.
pub const DEFAULT_SHARE_COUNT: u8 = 3;

/// Hex length of a 32-byte wallet private key.
pub const PRIVATE_KEY_HEX_LEN: usize = 64;

/// One share of a split private key.
///
/// `index` is the share's 1-based position among the shares generated
/// together and doubles as the polynomial evaluation point. Shares from
/// the same split are interchangeable: any two reconstruct the key, and
/// none is privileged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyShare {
    /// Evaluation point, 1-based.
    pub index: u8,

    /// Share payload; same length as the original key.
    #[serde(with = "hex_bytes")]
    pub data: Vec<u8>,
}

impl KeyShare {
    /// Build a share from its index and hex-encoded payload.
    pub fn from_hex(index: u8, data: &str) -> Result<Self, RecoveryError> {
        Ok(Self {
            index,
            data: decode_key_hex(data)?,
        })
    }

    /// Lowercase hex rendering of the share payload.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.data)
    }
}

/// Serialize share payloads as lowercase hex strings.
mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(&s).map_err(serde::de::Error::custom)
    }
}

/// Whether `s` looks like a 32-byte wallet private key: exactly 64 hex
/// characters, either case.
pub fn is_valid_private_key(s: &str) -> bool {
    s.len() == PRIVATE_KEY_HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Split a hex-encoded private key into [`DEFAULT_SHARE_COUNT`] shares,
/// any [`RECOVERY_THRESHOLD`] of which reconstruct it.
pub fn split_key(secret_hex: &str) -> Result<Vec<KeyShare>, RecoveryError> {
    split_key_with(secret_hex, DEFAULT_SHARE_COUNT)
}

/// Split a hex-encoded private key into `share_count` shares with the
/// fixed 2-of-N threshold.
///
/// Byte 0 of the key is copied into every share unchanged; only
/// positions >= 1 are masked by the per-byte polynomials.
pub fn split_key_with(secret_hex: &str, share_count: u8) -> Result<Vec<KeyShare>, RecoveryError> {
    let secret = decode_key_hex(secret_hex)?;

    if (share_count as usize) < RECOVERY_THRESHOLD {
        return Err(RecoveryError::InsufficientShares {
            needed: RECOVERY_THRESHOLD,
            got: share_count as usize,
        });
    }

    let mut shares: Vec<KeyShare> = (1..=share_count)
        .map(|index| KeyShare {
            index,
            data: vec![0u8; secret.len()],
        })
        .collect();

    for share in &mut shares {
        share.data[0] = secret[0];
    }

    // One fresh random coefficient per byte position, discarded after
    // the shares are derived.
    let rng = SystemRandom::new();
    let mut coefficient = [0u8; 1];
    for position in 1..secret.len() {
        rng.fill(&mut coefficient)
            .map_err(|_| RecoveryError::Internal("system rng unavailable".into()))?;
        for share in &mut shares {
            let mask = field::mul(coefficient[0], share.index);
            share.data[position] = field::add(secret[position], mask);
        }
    }

    debug!(
        share_count,
        key_bytes = secret.len(),
        "split key into shares"
    );
    Ok(shares)
}

/// Reconstruct a key from at least two shares, rendered as lowercase
/// hex.
///
/// Exactly the first two supplied shares are used, whatever their
/// indices; extra shares are ignored. The two must have distinct,
/// non-zero indices and payloads of equal length.
pub fn recover_key(shares: &[KeyShare]) -> Result<String, RecoveryError> {
    if shares.len() < RECOVERY_THRESHOLD {
        return Err(RecoveryError::InsufficientShares {
            needed: RECOVERY_THRESHOLD,
            got: shares.len(),
        });
    }

    let (first, second) = (&shares[0], &shares[1]);
    if first.index == 0 || second.index == 0 || first.index == second.index {
        return Err(RecoveryError::InvalidSecretFormat(
            "share indices must be distinct and non-zero".into(),
        ));
    }
    if first.data.is_empty() || first.data.len() != second.data.len() {
        return Err(RecoveryError::InvalidSecretFormat(
            "share payloads must be non-empty and of equal length".into(),
        ));
    }

    let mut secret = vec![0u8; first.data.len()];
    secret[0] = first.data[0];

    for position in 1..secret.len() {
        secret[position] = interpolate_at_zero(
            (first.index, first.data[position]),
            (second.index, second.data[position]),
        );
    }

    Ok(hex::encode(secret))
}

/// f(0) for the degree-1 polynomial through two points in GF(256).
///
/// Lagrange basis at zero: L1 = x2 / (x1 + x2), L2 = x1 / (x1 + x2)
/// (subtraction and addition coincide in characteristic 2).
fn interpolate_at_zero((x1, y1): (u8, u8), (x2, y2): (u8, u8)) -> u8 {
    let denominator_inv = field::inv(field::add(x1, x2));
    let l1 = field::mul(x2, denominator_inv);
    let l2 = field::mul(x1, denominator_inv);
    field::add(field::mul(y1, l1), field::mul(y2, l2))
}

/// Decode a non-empty, even-length hex string into key bytes.
fn decode_key_hex(s: &str) -> Result<Vec<u8>, RecoveryError> {
    if s.is_empty() || s.len() % 2 != 0 {
        return Err(RecoveryError::InvalidSecretFormat(
            "expected a non-empty, even-length hex string".into(),
        ));
    }
    hex::decode(s)
        .map_err(|_| RecoveryError::InvalidSecretFormat("not a hex-encoded byte string".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_key_hex() -> String {
        let rng = SystemRandom::new();
        let mut key = [0u8; 32];
        rng.fill(&mut key).unwrap();
        hex::encode(key)
    }

    #[test]
    fn split_produces_indexed_shares_of_key_length() {
        let secret = random_key_hex();
        let shares = split_key(&secret).unwrap();

        assert_eq!(shares.len(), 3);
        for (i, share) in shares.iter().enumerate() {
            assert_eq!(share.index, (i + 1) as u8);
            assert_eq!(share.data.len(), 32);
        }
    }

    #[test]
    fn any_two_of_three_shares_recover_the_key() {
        let secret = random_key_hex();
        let shares = split_key(&secret).unwrap();

        for (a, b) in [(0, 1), (0, 2), (1, 2)] {
            let pair = vec![shares[a].clone(), shares[b].clone()];
            assert_eq!(recover_key(&pair).unwrap(), secret, "pair ({a}, {b})");
        }
    }

    #[test]
    fn recovery_is_order_insensitive() {
        let secret = random_key_hex();
        let shares = split_key(&secret).unwrap();

        let reversed = vec![shares[2].clone(), shares[0].clone()];
        assert_eq!(recover_key(&reversed).unwrap(), secret);
    }

    #[test]
    fn extra_shares_beyond_the_first_two_are_ignored() {
        let secret = random_key_hex();
        let mut shares = split_key(&secret).unwrap();

        // Corrupt the third share; recovery must not touch it.
        shares[2].data[5] ^= 0xff;
        assert_eq!(recover_key(&shares).unwrap(), secret);
    }

    #[test]
    fn first_byte_is_carried_in_every_share() {
        let secret = random_key_hex();
        let first_byte = hex::decode(&secret).unwrap()[0];

        for share in split_key(&secret).unwrap() {
            assert_eq!(share.data[0], first_byte);
        }
    }

    #[test]
    fn masked_positions_differ_from_the_key() {
        let secret = random_key_hex();
        let shares = split_key(&secret).unwrap();

        for share in &shares {
            assert_ne!(share.to_hex(), secret);
        }
    }

    #[test]
    fn fresh_coefficients_per_split() {
        let secret = random_key_hex();
        let first = split_key(&secret).unwrap();
        let second = split_key(&secret).unwrap();

        assert_ne!(first[0].data, second[0].data);
    }

    #[test]
    fn wider_splits_recover_from_distant_pairs() {
        let secret = random_key_hex();
        let shares = split_key_with(&secret, 5).unwrap();
        assert_eq!(shares.len(), 5);

        for (a, b) in [(0, 3), (2, 4), (1, 4)] {
            let pair = vec![shares[a].clone(), shares[b].clone()];
            assert_eq!(recover_key(&pair).unwrap(), secret, "pair ({a}, {b})");
        }
    }

    #[test]
    fn mixed_case_hex_is_accepted_and_normalized() {
        let secret = "A1B2C3D4E5F60718293A4B5C6D7E8F90A1B2C3D4E5F60718293A4B5C6D7E8F90";
        let shares = split_key(secret).unwrap();
        let recovered = recover_key(&shares[..2]).unwrap();
        assert_eq!(recovered, secret.to_lowercase());
    }

    #[test]
    fn split_rejects_empty_input() {
        assert_eq!(
            split_key(""),
            Err(RecoveryError::InvalidSecretFormat(
                "expected a non-empty, even-length hex string".into()
            ))
        );
    }

    #[test]
    fn split_rejects_odd_length_hex() {
        assert!(matches!(
            split_key("abc"),
            Err(RecoveryError::InvalidSecretFormat(_))
        ));
    }

    #[test]
    fn split_rejects_non_hex_characters() {
        assert!(matches!(
            split_key("zzzz"),
            Err(RecoveryError::InvalidSecretFormat(_))
        ));
    }

    #[test]
    fn split_rejects_share_count_below_threshold() {
        let secret = random_key_hex();
        assert_eq!(
            split_key_with(&secret, 1),
            Err(RecoveryError::InsufficientShares { needed: 2, got: 1 })
        );
    }

    #[test]
    fn recover_rejects_a_single_share() {
        let secret = random_key_hex();
        let shares = split_key(&secret).unwrap();

        assert_eq!(
            recover_key(&shares[..1]),
            Err(RecoveryError::InsufficientShares { needed: 2, got: 1 })
        );
    }

    #[test]
    fn recover_rejects_duplicate_indices() {
        let secret = random_key_hex();
        let shares = split_key(&secret).unwrap();

        let duplicated = vec![shares[0].clone(), shares[0].clone()];
        assert!(matches!(
            recover_key(&duplicated),
            Err(RecoveryError::InvalidSecretFormat(_))
        ));
    }

    #[test]
    fn recover_rejects_mismatched_payload_lengths() {
        let a = KeyShare::from_hex(1, "aabb").unwrap();
        let b = KeyShare::from_hex(2, "aabbcc").unwrap();
        assert!(matches!(
            recover_key(&[a, b]),
            Err(RecoveryError::InvalidSecretFormat(_))
        ));
    }

    #[test]
    fn recover_rejects_zero_index() {
        let a = KeyShare::from_hex(0, "aabb").unwrap();
        let b = KeyShare::from_hex(2, "ccdd").unwrap();
        assert!(matches!(
            recover_key(&[a, b]),
            Err(RecoveryError::InvalidSecretFormat(_))
        ));
    }

    #[test]
    fn validates_private_key_format() {
        assert!(is_valid_private_key(
            "a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5c6d7e8f90"
        ));
        assert!(is_valid_private_key(
            "A1B2C3D4E5F60718293A4B5C6D7E8F90A1B2C3D4E5F60718293A4B5C6D7E8F90"
        ));
        assert!(!is_valid_private_key(""));
        assert!(!is_valid_private_key("a1b2"));
        assert!(!is_valid_private_key(&"g".repeat(64)));
        assert!(!is_valid_private_key(&"a".repeat(65)));
    }

    #[test]
    fn shares_serialize_with_hex_payloads() {
        let share = KeyShare::from_hex(2, "deadbeef").unwrap();
        let json = serde_json::to_string(&share).unwrap();
        assert_eq!(json, r#"{"index":2,"data":"deadbeef"}"#);

        let parsed: KeyShare = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, share);
    }

    #[test]
    fn share_hex_round_trips() {
        let share = KeyShare::from_hex(1, "00ff10").unwrap();
        assert_eq!(share.to_hex(), "00ff10");
    }
}
