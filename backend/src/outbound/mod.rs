//! Outbound adapters implementing the domain's driven ports.

pub mod memory;
pub mod token_auth;
pub mod username_http;

pub use memory::MemoryStore;
pub use token_auth::StaticTokenAuthorizer;
pub use username_http::HttpUsernameVerifier;
