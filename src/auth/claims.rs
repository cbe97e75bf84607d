// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User claims embedded in a verified payload.

use serde::{Deserialize, Serialize};

/// The `user` object carried inside an init-data payload.
///
/// Telegram serializes this as JSON inside the URL-encoded `user` field.
/// Only `id` is guaranteed; the rest depends on the account's privacy
/// settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramUser {
    /// Numeric Telegram account ID
    pub id: i64,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// Public @username handle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Outcome of a successful verification.
///
/// Signature and freshness are the load-bearing checks: a payload whose
/// `user` field is absent or unparsable still verifies, it just carries
/// no subject identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedPayload {
    /// Canonical subject ID: the stringified Telegram user ID, when the
    /// payload carried a parsable `user` object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,

    /// Parsed user claims, when present and well-formed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<TelegramUser>,

    /// The payload's `auth_date`, seconds since epoch.
    pub issued_at: i64,
}
