//! Domain layer for Matchdesk
//!
//! Value objects and entities used by the admin access guard: client
//! identities, rate policies and the fixed-window counter state.
//! This layer performs no I/O and reads no clocks.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
