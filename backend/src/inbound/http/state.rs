//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they
//! only depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AdminAuthorizer, EntriesCommand, EntriesQuery, TopicsCommand, TopicsQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Topic read port.
    pub topics_query: Arc<dyn TopicsQuery>,
    /// Topic write port.
    pub topics: Arc<dyn TopicsCommand>,
    /// Entry read port.
    pub entries_query: Arc<dyn EntriesQuery>,
    /// Entry write port.
    pub entries: Arc<dyn EntriesCommand>,
    /// Admin authorization verdict provider.
    pub authorizer: Arc<dyn AdminAuthorizer>,
}
