//! Domain core: entities, validation, services, and ports.
//!
//! Everything here is transport agnostic. Inbound adapters translate
//! HTTP requests into port calls and map [`Error`] values onto status
//! codes; outbound adapters implement the driven ports against the
//! document store and the external collaborators.

pub mod entries_service;
pub mod entry;
pub mod error;
pub mod export;
pub mod fields;
pub mod listing;
pub mod ports;
pub mod topic;
pub mod topics_service;
pub mod uniqueness;
pub mod wallet;

pub use self::entries_service::EntryService;
pub use self::entry::{Entry, EntryDraft, EntryForm, FieldFailures, validate_form};
pub use self::error::{Error, ErrorCode};
pub use self::fields::{
    DiscordUsername, Email, FieldError, PlatformUsername, TelegramPolicy, TelegramUsername,
    TopicDescription, TopicName,
};
pub use self::listing::ListingPlan;
pub use self::topic::{Topic, TopicDraft};
pub use self::topics_service::TopicService;
pub use self::uniqueness::{UniquenessScope, UniquenessViolation, find_conflict};
pub use self::wallet::WalletAddress;
