//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure and presentation layers
//! implement these ports.

mod clock;
mod document_store;
mod inbound_request;
mod rate_limit_store;

pub use clock::Clock;
#[cfg(test)]
pub use document_store::MockDocumentStorePort;
pub use document_store::{DocumentStorePort, StoredDocument};
pub use inbound_request::InboundRequest;
pub use rate_limit_store::RateLimitStore;
