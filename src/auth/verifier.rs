// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HMAC verification of Telegram Mini App init data.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{debug, warn};

use super::claims::{TelegramUser, VerifiedPayload};
use super::error::VerifyError;
use super::payload::SignedPayload;
use crate::config::{BOT_TOKEN_ENV, DEFAULT_MAX_AGE_SECONDS, MAX_AGE_ENV};

type HmacSha256 = Hmac<Sha256>;

/// HMAC key under which the per-bot secret key is derived from the bot
/// token. The literal is the HMAC *key* and the token the *message*;
/// the issuer derives its signing key the same way, so the roles must
/// not be swapped.
const SECRET_DERIVATION_KEY: &[u8] = b"WebAppData";

/// Verifier for signed init-data payloads.
///
/// Holds the bot token and the freshness window. Construction is cheap;
/// one verifier can serve any number of concurrent `verify` calls.
///
/// # Example
///
/// ```rust,ignore
/// let verifier = InitDataVerifier::new(bot_token);
/// let claims = verifier.verify(&init_data)?;
/// ```
pub struct InitDataVerifier {
    bot_token: String,
    max_age_seconds: i64,
}

impl InitDataVerifier {
    /// Create a verifier with the default freshness window.
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            max_age_seconds: DEFAULT_MAX_AGE_SECONDS,
        }
    }

    /// Override the freshness window, in seconds.
    pub fn with_max_age(mut self, seconds: i64) -> Self {
        self.max_age_seconds = seconds;
        self
    }

    /// Build a verifier from the environment.
    ///
    /// Reads the bot token from `TELEGRAM_BOT_TOKEN` and an optional
    /// window override from `INITDATA_MAX_AGE_SECONDS`. Returns `None`
    /// when no token is configured; an unparsable override falls back to
    /// the default window.
    pub fn from_env() -> Option<Self> {
        let bot_token = std::env::var(BOT_TOKEN_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())?;

        let max_age_seconds = std::env::var(MAX_AGE_ENV)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_MAX_AGE_SECONDS);

        Some(Self {
            bot_token,
            max_age_seconds,
        })
    }

    /// Verify a payload against the current system clock.
    pub fn verify(&self, encoded: &str) -> Result<VerifiedPayload, VerifyError> {
        self.verify_at(encoded, chrono::Utc::now().timestamp())
    }

    /// Verify a payload against an explicit clock.
    ///
    /// `now` is seconds since epoch. The freshness boundary is
    /// inclusive: a payload whose `auth_date` is exactly
    /// `max_age_seconds` old is rejected as expired. Freshness is
    /// checked before the signature.
    pub fn verify_at(&self, encoded: &str, now: i64) -> Result<VerifiedPayload, VerifyError> {
        let mut payload = SignedPayload::parse(encoded);

        let received_hash = payload
            .take("hash")
            .ok_or(VerifyError::MissingField("hash"))?;

        let auth_date: i64 = payload
            .get("auth_date")
            .ok_or(VerifyError::MissingField("auth_date"))?
            .parse()
            .map_err(|_| VerifyError::MalformedTimestamp)?;

        if now - auth_date >= self.max_age_seconds {
            debug!(age_seconds = now - auth_date, "rejecting stale init data");
            return Err(VerifyError::Expired);
        }

        let computed_hash = self.compute_hash(&payload.check_string())?;

        // Length and content are checked together, without
        // short-circuiting on the first differing byte.
        if ring::constant_time::verify_slices_are_equal(
            computed_hash.as_bytes(),
            received_hash.as_bytes(),
        )
        .is_err()
        {
            warn!("init data signature mismatch");
            return Err(VerifyError::SignatureMismatch);
        }

        // Only signature and freshness are load-bearing: a missing or
        // unparsable `user` object still verifies.
        let user = payload
            .get("user")
            .and_then(|raw| serde_json::from_str::<TelegramUser>(raw).ok());
        let subject_id = user.as_ref().map(|u| u.id.to_string());

        Ok(VerifiedPayload {
            subject_id,
            user,
            issued_at: auth_date,
        })
    }

    /// Recompute the payload MAC: derive the per-bot secret key, then
    /// MAC the data-check string, rendered as lowercase hex.
    fn compute_hash(&self, check_string: &str) -> Result<String, VerifyError> {
        let mut derivation = HmacSha256::new_from_slice(SECRET_DERIVATION_KEY)
            .map_err(|e| VerifyError::InternalError(e.to_string()))?;
        derivation.update(self.bot_token.as_bytes());
        let secret_key = derivation.finalize().into_bytes();

        let mut mac = HmacSha256::new_from_slice(&secret_key)
            .map_err(|e| VerifyError::InternalError(e.to_string()))?;
        mac.update(check_string.as_bytes());

        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

// The token must not leak through debug formatting.
impl std::fmt::Debug for InitDataVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitDataVerifier")
            .field("max_age_seconds", &self.max_age_seconds)
            .finish_non_exhaustive()
    }
}
