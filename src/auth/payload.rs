// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Parsing and canonicalization of signed init-data payloads.

use std::collections::BTreeMap;

/// A parsed init-data payload.
///
/// Fields are percent-decoded and keyed uniquely: when a key repeats in
/// the query string, the last occurrence wins, matching standard
/// query-string semantics. Keys are held sorted byte-wise ascending,
/// which is the order the data-check string requires.
#[derive(Debug, Clone, Default)]
pub struct SignedPayload {
    fields: BTreeMap<String, String>,
}

impl SignedPayload {
    /// Parse a URL-encoded query string into a payload.
    ///
    /// Parsing itself never fails; absent mandatory fields surface when
    /// the verifier asks for them.
    pub fn parse(encoded: &str) -> Self {
        let fields = url::form_urlencoded::parse(encoded.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { fields }
    }

    /// Look up a field by key, decoded.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Remove a field and return its decoded value.
    pub fn take(&mut self, key: &str) -> Option<String> {
        self.fields.remove(key)
    }

    /// Build the data-check string over the remaining fields.
    ///
    /// Each pair renders as `key=value` with the decoded value; pairs are
    /// joined by a single `\n` in byte-wise ascending key order, with no
    /// trailing newline. This is the exact byte sequence the MAC covers,
    /// so the `hash` field must be taken out before calling this.
    pub fn check_string(&self) -> String {
        self.fields
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
