//! Domain ports: the seams between the core and its collaborators.
//!
//! Driven ports ([`TopicRepository`], [`EntryRepository`],
//! [`PlatformUsernameVerifier`], [`AdminAuthorizer`]) are implemented by
//! outbound adapters; driving ports ([`TopicsQuery`], [`TopicsCommand`],
//! [`EntriesQuery`], [`EntriesCommand`]) are implemented by the domain
//! services and consumed by the inbound HTTP adapter. All ports are
//! auto-mocked under test.

pub mod authorizer;
pub mod entries;
pub mod entry_repository;
pub mod topic_repository;
pub mod topics;
pub mod username_verifier;

pub use authorizer::{AdminAuthorizer, AuthorizerError, FixtureAdminAuthorizer};
pub use entries::{EntriesCommand, EntriesQuery, EntryListRequest, EntryPage, SubmitEntryRequest};
pub use entry_repository::{EntryRepository, EntryRepositoryError};
pub use topic_repository::{
    CascadeOutcome, TopicFilter, TopicRepository, TopicRepositoryError,
};
pub use topics::{NewTopic, TopicPage, TopicsCommand, TopicsQuery};
pub use username_verifier::{
    FixturePlatformUsernameVerifier, PlatformUsernameVerifier, UsernameVerifierError,
};

#[cfg(test)]
pub use authorizer::MockAdminAuthorizer;
#[cfg(test)]
pub use entries::{MockEntriesCommand, MockEntriesQuery};
#[cfg(test)]
pub use entry_repository::MockEntryRepository;
#[cfg(test)]
pub use topic_repository::MockTopicRepository;
#[cfg(test)]
pub use topics::{MockTopicsCommand, MockTopicsQuery};
#[cfg(test)]
pub use username_verifier::MockPlatformUsernameVerifier;
