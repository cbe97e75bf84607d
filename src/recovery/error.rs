// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Key recovery errors.

/// Errors produced by key splitting, reconstruction, and distribution.
///
/// Messages name the coarse failure only; key bytes and share payloads
/// never appear in them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecoveryError {
    /// The secret or a share payload is not usable as key material.
    #[error("invalid key material: {0}")]
    InvalidSecretFormat(String),

    /// Fewer shares than reconstruction requires.
    #[error("{got} share(s) supplied, at least {needed} required")]
    InsufficientShares { needed: usize, got: usize },

    /// The share set does not match the expected count.
    #[error("supplied share count {supplied} does not match expected count {expected}")]
    ShareCountMismatch { expected: usize, supplied: usize },

    /// Unexpected internal failure.
    #[error("internal recovery error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_counts_only() {
        let err = RecoveryError::ShareCountMismatch {
            expected: 3,
            supplied: 2,
        };
        assert_eq!(
            err.to_string(),
            "supplied share count 2 does not match expected count 3"
        );

        let err = RecoveryError::InsufficientShares { needed: 2, got: 1 };
        assert_eq!(err.to_string(), "1 share(s) supplied, at least 2 required");
    }
}
