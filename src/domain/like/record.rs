use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use validator::Validate;

lazy_static! {
    static ref STORE_UNSAFE_CHARS: regex::Regex = regex::Regex::new(r"[.#$/\[\]]").unwrap();
}

/// Store-safe key identifying one person across sessions and devices.
///
/// Derived from the verified contact address: trimmed, lowercased, and with
/// every character the document store reserves (`. # $ / [ ]`) replaced by `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn from_contact_address(address: &str) -> Self {
        let normalized = address.trim().to_lowercase();
        Self(STORE_UNSAFE_CHARS.replace_all(&normalized, "_").into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An authenticated person as reported by the identity provider.
///
/// Only the contact address is checked. The avatar is whatever the provider
/// hands back and is stored as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Identity {
    #[validate(length(min = 1))]
    pub display_name: String,

    #[validate(email)]
    pub contact_address: String,

    pub avatar_url: Option<String>,
}

impl Identity {
    pub fn new(
        display_name: Option<String>,
        contact_address: String,
        avatar_url: Option<String>,
    ) -> Self {
        let display_name = display_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Anonymous".to_string());
        Self {
            display_name,
            contact_address: contact_address.trim().to_string(),
            avatar_url: avatar_url.filter(|url| !url.trim().is_empty()),
        }
    }

    pub fn key(&self) -> IdentityKey {
        IdentityKey::from_contact_address(&self.contact_address)
    }

    /// First whitespace-separated token of the display name.
    pub fn first_name(&self) -> &str {
        self.display_name
            .split_whitespace()
            .next()
            .unwrap_or("Anonymous")
    }
}

/// One person's like. Created once, never updated or deleted.
///
/// The `identity_key` is the record's unique key; the store refuses a second
/// record with the same key, which is what keeps the like count honest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LikeRecord {
    pub identity_key: IdentityKey,
    pub display_name: String,
    pub contact_address: String,
    pub avatar_url: Option<String>,
    pub liked_at: DateTime<Utc>,
}

impl LikeRecord {
    pub fn new(identity: &Identity, liked_at: DateTime<Utc>) -> Self {
        Self {
            identity_key: identity.key(),
            display_name: identity.display_name.clone(),
            contact_address: identity.contact_address.clone(),
            avatar_url: identity.avatar_url.clone(),
            liked_at,
        }
    }
}
