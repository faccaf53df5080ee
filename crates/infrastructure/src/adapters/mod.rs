//! Port adapters

mod in_memory_document_store;
mod in_memory_rate_limit_store;
mod manual_clock;
mod system_clock;

pub use in_memory_document_store::InMemoryDocumentStore;
pub use in_memory_rate_limit_store::InMemoryRateLimitStore;
pub use manual_clock::ManualClock;
pub use system_clock::SystemClock;
