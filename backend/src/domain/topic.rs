//! Topic aggregate: a named campaign entries are submitted against.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::fields::{FieldError, TopicDescription, TopicName};

/// Stored topic.
///
/// ## Invariants
/// - `created_at` is set once by the store and never mutated.
/// - The only permitted mutations are the activity toggle and cascade
///   deletion together with every entry referencing the topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Display name, also denormalised onto entries at submission time.
    pub name: TopicName,
    /// Description shown on the submission form.
    pub description: TopicDescription,
    /// Whether the topic currently accepts submissions.
    pub is_active: bool,
    /// Creation instant, immutable.
    pub created_at: DateTime<Utc>,
}

/// Validated topic fields awaiting store insertion.
///
/// New topics always start active; the flag is not part of the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicDraft {
    /// Validated display name.
    pub name: TopicName,
    /// Validated description.
    pub description: TopicDescription,
}

impl TopicDraft {
    /// Validate raw form input into a draft.
    ///
    /// Collects a failure for every invalid field rather than stopping at
    /// the first, keyed by the wire-format field name.
    pub fn from_form(name: &str, description: &str) -> Result<Self, Vec<(&'static str, FieldError)>> {
        let mut failures = Vec::new();
        let name = match TopicName::new(name) {
            Ok(value) => Some(value),
            Err(error) => {
                failures.push(("name", error));
                None
            }
        };
        let description = match TopicDescription::new(description) {
            Ok(value) => Some(value),
            Err(error) => {
                failures.push(("description", error));
                None
            }
        };
        match (name, description) {
            (Some(name), Some(description)) => Ok(Self { name, description }),
            _ => Err(failures),
        }
    }
}
