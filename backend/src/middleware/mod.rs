//! Actix middleware shared by every inbound adapter.

pub mod trace;

pub use trace::{Trace, TraceId};
