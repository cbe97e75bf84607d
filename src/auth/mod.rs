// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! This module verifies Telegram Mini App init-data payloads for the
//! wallet API.
//!
//! ## Auth Flow
//!
//! 1. The Mini App opens inside Telegram, which hands it a signed
//!    `initData` query string
//! 2. The frontend forwards the string verbatim to the wallet service
//! 3. The service:
//!    - Parses and canonicalizes the payload
//!    - Checks the `auth_date` freshness window
//!    - Recomputes the HMAC chain from the bot token and compares it to
//!      the transmitted `hash` in constant time
//!    - Extracts the embedded `user` claims on success
//!
//! ## Security
//!
//! - The bot token is the shared secret with the issuer; it is never
//!   logged and has no `Debug` rendering
//! - Hash comparison is constant-time with an up-front length check
//! - Freshness uses an inclusive boundary: a payload exactly `max_age`
//!   seconds old is already rejected
//! - Rejections carry only a coarse reason category

pub mod claims;
pub mod error;
pub mod payload;
pub mod verifier;

pub use claims::{TelegramUser, VerifiedPayload};
pub use error::VerifyError;
pub use payload::SignedPayload;
pub use verifier::InitDataVerifier;
