//! Value objects - immutable types identified by their value

mod client_id;
mod document_key;
mod rate_policy;

pub use client_id::ClientId;
pub use document_key::DocumentKey;
pub use rate_policy::RatePolicy;
