//! Entry aggregate: one user's submission tied to exactly one topic.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::fields::{
    DiscordUsername, Email, PlatformUsername, TelegramPolicy, TelegramUsername,
};
use super::wallet::WalletAddress;

/// Stored entry.
///
/// ## Invariants
/// - `topic_id` referenced an existing topic at creation time; cascade
///   deletion keeps the reference from dangling afterwards.
/// - `topic_name` is a denormalised copy of the topic name at submission
///   time, kept for cross-topic search without a join.
/// - `created_at` is set once by the store and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Referenced topic.
    pub topic_id: Uuid,
    /// Topic name at submission time.
    pub topic_name: String,
    /// Canonical (sigil-less) Telegram username.
    pub telegram_username: TelegramUsername,
    /// Locally validated and externally verified platform username.
    pub platform_username: PlatformUsername,
    /// Canonical checksummed wallet address.
    pub wallet_address: WalletAddress,
    /// Optional Discord username.
    pub discord_username: Option<DiscordUsername>,
    /// Contact email.
    pub email: Email,
    /// Submission instant, immutable.
    pub created_at: DateTime<Utc>,
}

/// Validated entry fields awaiting store insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    /// Referenced topic.
    pub topic_id: Uuid,
    /// Topic name captured from the referenced topic.
    pub topic_name: String,
    /// Canonical Telegram username.
    pub telegram_username: TelegramUsername,
    /// Platform username.
    pub platform_username: PlatformUsername,
    /// Canonical wallet address.
    pub wallet_address: WalletAddress,
    /// Optional Discord username.
    pub discord_username: Option<DiscordUsername>,
    /// Contact email.
    pub email: Email,
}

/// Raw submission form as received on the wire, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryForm {
    /// Raw Telegram username, `@` optional depending on policy.
    pub telegram_username: String,
    /// Raw platform username.
    pub platform_username: String,
    /// Raw wallet address.
    pub wallet_address: String,
    /// Raw Discord username; absent or blank is valid.
    pub discord_username: Option<String>,
    /// Raw email address.
    pub email: String,
}

/// Entry fields that passed every local validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEntryFields {
    /// Canonical Telegram username.
    pub telegram_username: TelegramUsername,
    /// Platform username pending external verification.
    pub platform_username: PlatformUsername,
    /// Canonical wallet address.
    pub wallet_address: WalletAddress,
    /// Optional Discord username.
    pub discord_username: Option<DiscordUsername>,
    /// Contact email.
    pub email: Email,
}

/// Map from wire-format field name to the user-facing reason it failed.
///
/// Passing fields are absent; iteration order is deterministic.
pub type FieldFailures = BTreeMap<&'static str, String>;

/// Run every field validator over the form.
///
/// Validators are pure and order-independent; the result collects all
/// failing fields at once so a form round-trip fixes everything in one
/// pass.
pub fn validate_form(
    form: &EntryForm,
    policy: TelegramPolicy,
) -> Result<ValidatedEntryFields, FieldFailures> {
    let mut failures = FieldFailures::new();

    let telegram_username = TelegramUsername::new(&form.telegram_username, policy)
        .map_err(|error| failures.insert("telegramUsername", error.to_string()))
        .ok();
    let platform_username = PlatformUsername::new(&form.platform_username)
        .map_err(|error| failures.insert("platformUsername", error.to_string()))
        .ok();
    let wallet_address = WalletAddress::new(&form.wallet_address)
        .map_err(|error| failures.insert("walletAddress", error.to_string()))
        .ok();
    let discord_username = DiscordUsername::new_optional(form.discord_username.as_deref())
        .map_err(|error| failures.insert("discordUsername", error.to_string()))
        .ok();
    let email = Email::new(&form.email)
        .map_err(|error| failures.insert("email", error.to_string()))
        .ok();

    match (
        telegram_username,
        platform_username,
        wallet_address,
        discord_username,
        email,
    ) {
        (
            Some(telegram_username),
            Some(platform_username),
            Some(wallet_address),
            Some(discord_username),
            Some(email),
        ) if failures.is_empty() => Ok(ValidatedEntryFields {
            telegram_username,
            platform_username,
            wallet_address,
            discord_username,
            email,
        }),
        _ => Err(failures),
    }
}
