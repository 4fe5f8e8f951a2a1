//! Validated form-field newtypes for topics and submission entries.
//!
//! Each constructor enforces, in order: presence, then length, then the
//! field pattern. Inputs are trimmed of surrounding whitespace before any
//! check. A failing constructor reports the first violated rule as a
//! [`FieldError`], so an empty required field is always "required" and
//! never a pattern failure.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Maximum length of a topic name.
pub const TOPIC_NAME_MAX: usize = 100;
/// Maximum length of a topic description.
pub const TOPIC_DESCRIPTION_MAX: usize = 500;
/// Maximum length of a Telegram username, excluding the `@` sigil.
pub const TELEGRAM_USERNAME_MAX: usize = 32;
/// Minimum length of a platform username.
pub const PLATFORM_USERNAME_MIN: usize = 3;
/// Maximum length of a platform username.
pub const PLATFORM_USERNAME_MAX: usize = 20;
/// Maximum length of a Discord username.
pub const DISCORD_USERNAME_MAX: usize = 32;
/// Maximum length of an email address.
pub const EMAIL_MAX: usize = 254;

/// Single-field validation failure with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// A required field was absent or blank.
    Required,
    /// The value exceeds the field's maximum length.
    TooLong { max: usize },
    /// The value is below the field's minimum length.
    TooShort { min: usize },
    /// Strict Telegram policy requires the leading `@`.
    TelegramMissingAt,
    /// The Telegram username violates the allowed pattern.
    TelegramInvalid,
    /// The platform username starts with a digit.
    PlatformLeadingDigit,
    /// The platform username contains a disallowed character.
    PlatformInvalid,
    /// The wallet address is not `0x` followed by 40 hex digits.
    WalletInvalidFormat,
    /// The mixed-case wallet address fails its checksum.
    WalletChecksumMismatch,
    /// The Discord username contains a disallowed character.
    DiscordInvalid,
    /// The email address is not structurally valid.
    EmailInvalid,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "this field is required"),
            Self::TooLong { max } => write!(f, "must be at most {max} characters"),
            Self::TooShort { min } => write!(f, "must be at least {min} characters"),
            Self::TelegramMissingAt => write!(f, "telegram username must start with @"),
            Self::TelegramInvalid => write!(
                f,
                "telegram username may contain up to {TELEGRAM_USERNAME_MAX} letters, digits, or underscores",
            ),
            Self::PlatformLeadingDigit => {
                write!(f, "platform username must not start with a digit")
            }
            Self::PlatformInvalid => write!(
                f,
                "platform username may contain letters, digits, underscores, or dots",
            ),
            Self::WalletInvalidFormat => {
                write!(f, "wallet address must be 0x followed by 40 hex digits")
            }
            Self::WalletChecksumMismatch => write!(f, "wallet address checksum is invalid"),
            Self::DiscordInvalid => write!(
                f,
                "discord username may contain letters, digits, underscores, or #",
            ),
            Self::EmailInvalid => write!(f, "must be a valid email address"),
        }
    }
}

impl std::error::Error for FieldError {}

/// Telegram username acceptance policy.
///
/// The canonical stored form never carries the `@` sigil; the policy only
/// controls whether the boundary demands it on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TelegramPolicy {
    /// The leading `@` is optional on input.
    #[default]
    Lenient,
    /// The leading `@` is required on input.
    Strict,
}

fn telegram_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new("^[A-Za-z0-9_]{1,32}$")
            .unwrap_or_else(|error| panic!("telegram username regex failed to compile: {error}"))
    })
}

fn platform_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new("^[A-Za-z0-9_.]+$")
            .unwrap_or_else(|error| panic!("platform username regex failed to compile: {error}"))
    })
}

fn discord_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new("^[A-Za-z0-9_#]+$")
            .unwrap_or_else(|error| panic!("discord username regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Structural shape only: dotted-domain, no whitespace. Mailbox
        // deliverability is not a boundary concern.
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Topic display name, trimmed and at most [`TOPIC_NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicName(String);

impl TopicName {
    /// Validate and construct a topic name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, FieldError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(FieldError::Required);
        }
        if trimmed.chars().count() > TOPIC_NAME_MAX {
            return Err(FieldError::TooLong {
                max: TOPIC_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

/// Topic description, trimmed and at most [`TOPIC_DESCRIPTION_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicDescription(String);

impl TopicDescription {
    /// Validate and construct a topic description.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, FieldError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(FieldError::Required);
        }
        if trimmed.chars().count() > TOPIC_DESCRIPTION_MAX {
            return Err(FieldError::TooLong {
                max: TOPIC_DESCRIPTION_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

/// Telegram username in canonical form, without the `@` sigil.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramUsername(String);

impl TelegramUsername {
    /// Validate and normalise a Telegram username under `policy`.
    pub fn new(raw: impl AsRef<str>, policy: TelegramPolicy) -> Result<Self, FieldError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(FieldError::Required);
        }
        let bare = match trimmed.strip_prefix('@') {
            Some(rest) => rest,
            None if policy == TelegramPolicy::Strict => {
                return Err(FieldError::TelegramMissingAt);
            }
            None => trimmed,
        };
        if !telegram_regex().is_match(bare) {
            return Err(FieldError::TelegramInvalid);
        }
        Ok(Self(bare.to_owned()))
    }
}

/// Platform username that passed local rules.
///
/// The external verification predicate runs separately; this type only
/// covers length and character checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformUsername(String);

impl PlatformUsername {
    /// Validate and construct a platform username.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, FieldError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(FieldError::Required);
        }
        let length = trimmed.chars().count();
        if length < PLATFORM_USERNAME_MIN {
            return Err(FieldError::TooShort {
                min: PLATFORM_USERNAME_MIN,
            });
        }
        if length > PLATFORM_USERNAME_MAX {
            return Err(FieldError::TooLong {
                max: PLATFORM_USERNAME_MAX,
            });
        }
        if trimmed.chars().next().is_some_and(|ch| ch.is_ascii_digit()) {
            return Err(FieldError::PlatformLeadingDigit);
        }
        if !platform_regex().is_match(trimmed) {
            return Err(FieldError::PlatformInvalid);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

/// Optional Discord username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscordUsername(String);

impl DiscordUsername {
    /// Validate an optional Discord username.
    ///
    /// Absent or blank input is valid and yields `None`; the pattern and
    /// length checks only apply to non-empty values.
    pub fn new_optional(raw: Option<&str>) -> Result<Option<Self>, FieldError> {
        let Some(trimmed) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
            return Ok(None);
        };
        if trimmed.chars().count() > DISCORD_USERNAME_MAX {
            return Err(FieldError::TooLong {
                max: DISCORD_USERNAME_MAX,
            });
        }
        if !discord_regex().is_match(trimmed) {
            return Err(FieldError::DiscordInvalid);
        }
        Ok(Some(Self(trimmed.to_owned())))
    }
}

/// Structurally valid email address, stored as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    /// Validate and construct an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, FieldError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(FieldError::Required);
        }
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(FieldError::TooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(trimmed) {
            return Err(FieldError::EmailInvalid);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Case-insensitive mailbox comparison used by the uniqueness scan.
    pub fn matches(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

macro_rules! string_newtype_views {
    ($($name:ident),* $(,)?) => {
        $(
            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    self.0.as_str()
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_ref())
                }
            }

            impl From<$name> for String {
                fn from(value: $name) -> Self {
                    value.0
                }
            }
        )*
    };
}

string_newtype_views!(
    TopicName,
    TopicDescription,
    TelegramUsername,
    PlatformUsername,
    DiscordUsername,
    Email,
);
