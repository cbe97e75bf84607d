// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Key Recovery Module
//!
//! This module splits wallet private keys into shares for social
//! recovery and reconstructs them from a threshold subset.
//!
//! ## Recovery Flow
//!
//! 1. At wallet creation, the private key is split into three shares;
//!    any two of them reconstruct the key
//! 2. Shares are distributed across custodian buckets (browser, server,
//!    external) under a configurable strategy
//! 3. A recovery record correlates the split with a later reconstruction
//!    attempt via an opaque recovery ID
//! 4. On recovery, collected shares are checked against the record and
//!    the key is reconstructed
//!
//! ## Security
//!
//! - Polynomial coefficients come from the system CSPRNG and are
//!   discarded once the shares are derived
//! - All arithmetic is over GF(256); a single share reveals nothing
//!   about the masked key bytes
//! - Byte 0 of the key is carried in every share unchanged; only
//!   positions >= 1 are masked
//! - The recovery record is correlation metadata, not a security
//!   boundary: holding enough shares is sufficient to reconstruct

pub mod error;
mod field;
pub mod social;
pub mod splitter;
pub mod storage;

pub use error::RecoveryError;
pub use social::{generate_social_recovery, recover_from_social_recovery, RecoveryRequest};
pub use splitter::{
    is_valid_private_key, recover_key, split_key, split_key_with, KeyShare, DEFAULT_SHARE_COUNT,
    PRIVATE_KEY_HEX_LEN, RECOVERY_THRESHOLD,
};
pub use storage::{collect_shares, distribute_shares, DistributionStrategy, ShareBuckets};
