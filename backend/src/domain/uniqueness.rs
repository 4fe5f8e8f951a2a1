//! Duplicate-submission detection for candidate entries.
//!
//! A candidate is scanned linearly against the already-stored entries
//! relevant to its scope. When several constraints are violated at once,
//! the reported conflict follows a fixed precedence so clients always see
//! the same error first: wallet address, then email, then the
//! (telegram, platform) username pair.

use std::fmt;
use std::str::FromStr;

use super::entry::{Entry, EntryDraft};

/// How widely the wallet-address and email constraints apply.
///
/// The username-pair constraint is always scoped to the candidate's topic
/// regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UniquenessScope {
    /// Constraints apply among entries sharing the candidate's topic.
    #[default]
    PerTopic,
    /// Wallet address and email must be unique across every topic.
    Global,
}

impl FromStr for UniquenessScope {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "per-topic" => Ok(Self::PerTopic),
            "global" => Ok(Self::Global),
            other => Err(format!(
                "unknown uniqueness scope {other:?}, expected per-topic or global"
            )),
        }
    }
}

/// The constraint a duplicate submission violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniquenessViolation {
    /// An entry in scope already uses this wallet address.
    WalletAddress,
    /// An entry in scope already uses this email address.
    Email,
    /// An entry in the same topic already uses this
    /// (telegram, platform) username pair.
    UsernamePair,
}

impl UniquenessViolation {
    /// Wire-format constraint identifier for client branching.
    pub const fn constraint(self) -> &'static str {
        match self {
            Self::WalletAddress => "walletAddress",
            Self::Email => "email",
            Self::UsernamePair => "telegramUsername+platformUsername",
        }
    }
}

impl fmt::Display for UniquenessViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WalletAddress => {
                write!(f, "an entry with this wallet address already exists")
            }
            Self::Email => write!(f, "an entry with this email address already exists"),
            Self::UsernamePair => write!(
                f,
                "an entry with this telegram and platform username pair already exists"
            ),
        }
    }
}

/// Scan `existing` for a conflict with `candidate`.
///
/// `existing` must hold the entries relevant to the scope: the
/// candidate's topic for [`UniquenessScope::PerTopic`], the whole
/// collection for [`UniquenessScope::Global`]. Entries outside the
/// effective scope of a constraint are ignored, so passing the whole
/// collection under per-topic scope is safe, merely wasteful.
pub fn find_conflict(
    candidate: &EntryDraft,
    existing: &[Entry],
    scope: UniquenessScope,
) -> Option<UniquenessViolation> {
    let wallet_scope = |entry: &Entry| {
        scope == UniquenessScope::Global || entry.topic_id == candidate.topic_id
    };

    if existing
        .iter()
        .any(|entry| wallet_scope(entry) && entry.wallet_address == candidate.wallet_address)
    {
        return Some(UniquenessViolation::WalletAddress);
    }
    if existing
        .iter()
        .any(|entry| wallet_scope(entry) && entry.email.matches(&candidate.email))
    {
        return Some(UniquenessViolation::Email);
    }
    if existing.iter().any(|entry| {
        entry.topic_id == candidate.topic_id
            && entry.telegram_username == candidate.telegram_username
            && entry.platform_username == candidate.platform_username
    }) {
        return Some(UniquenessViolation::UsernamePair);
    }
    None
}
