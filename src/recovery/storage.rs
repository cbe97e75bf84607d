// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Distribution of key shares across custodian buckets.
//!
//! Pure partitioning only: nothing here performs I/O. The embedding
//! service persists each bucket with its custodian.

use serde::{Deserialize, Serialize};

use super::error::RecoveryError;
use super::splitter::KeyShare;

/// Where the shares of a split key should live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionStrategy {
    /// All shares stay with the user agent.
    Browser,
    /// All shares stay on the server.
    Server,
    /// One share per custodian: browser, server, external.
    Hybrid,
}

/// Shares grouped by storage bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareBuckets {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub browser: Vec<KeyShare>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub server: Vec<KeyShare>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external: Vec<KeyShare>,
}

/// Partition `shares` across buckets under `strategy`.
///
/// The hybrid strategy requires exactly three shares and assigns the
/// first to the browser, the second to the server, and the third to the
/// external custodian.
pub fn distribute_shares(
    shares: &[KeyShare],
    strategy: DistributionStrategy,
) -> Result<ShareBuckets, RecoveryError> {
    match strategy {
        DistributionStrategy::Browser => Ok(ShareBuckets {
            browser: shares.to_vec(),
            ..Default::default()
        }),
        DistributionStrategy::Server => Ok(ShareBuckets {
            server: shares.to_vec(),
            ..Default::default()
        }),
        DistributionStrategy::Hybrid => {
            if shares.len() != 3 {
                return Err(RecoveryError::ShareCountMismatch {
                    expected: 3,
                    supplied: shares.len(),
                });
            }
            Ok(ShareBuckets {
                browser: vec![shares[0].clone()],
                server: vec![shares[1].clone()],
                external: vec![shares[2].clone()],
            })
        }
    }
}

/// Flatten buckets back into a single share list: browser first, then
/// server, then external.
pub fn collect_shares(buckets: &ShareBuckets) -> Vec<KeyShare> {
    let mut shares =
        Vec::with_capacity(buckets.browser.len() + buckets.server.len() + buckets.external.len());
    shares.extend_from_slice(&buckets.browser);
    shares.extend_from_slice(&buckets.server);
    shares.extend_from_slice(&buckets.external);
    shares
}
