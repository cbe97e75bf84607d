// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Social recovery: packaging key shares with correlation metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::error::RecoveryError;
use super::splitter::{self, KeyShare};

/// Correlates a key split with a later reconstruction attempt.
///
/// The record itself is not a security boundary: anyone holding enough
/// shares can reconstruct the key without it. It exists so the service
/// can tie a recovery attempt back to the split that produced the
/// shares.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryRequest {
    /// Wallet owner the split was generated for.
    pub subject_id: String,

    /// All shares produced by the split.
    pub shares: Vec<KeyShare>,

    /// Opaque, collision-resistant identifier for this record.
    pub recovery_id: String,

    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// Split `private_key_hex` and package the shares for social recovery.
pub fn generate_social_recovery(
    subject_id: impl Into<String>,
    private_key_hex: &str,
) -> Result<RecoveryRequest, RecoveryError> {
    let shares = splitter::split_key(private_key_hex)?;
    let subject_id = subject_id.into();
    let recovery_id = format!("recovery_{}", Uuid::new_v4().simple());

    info!(
        subject_id = %subject_id,
        recovery_id = %recovery_id,
        share_count = shares.len(),
        "generated social recovery record"
    );

    Ok(RecoveryRequest {
        subject_id,
        shares,
        recovery_id,
        created_at: Utc::now(),
    })
}

/// Reconstruct a key against a recovery record.
///
/// The supplied share count must equal the recorded count exactly, even
/// though reconstruction itself needs only two shares. Returns the key
/// as lowercase hex.
pub fn recover_from_social_recovery(
    request: &RecoveryRequest,
    supplied: &[KeyShare],
) -> Result<String, RecoveryError> {
    if supplied.len() != request.shares.len() {
        return Err(RecoveryError::ShareCountMismatch {
            expected: request.shares.len(),
            supplied: supplied.len(),
        });
    }

    splitter::recover_key(supplied)
}
