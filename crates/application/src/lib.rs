//! Application layer - admin access guard
//!
//! Ports for the clock, rate-limit storage, inbound requests and the document
//! store, plus the services that compose them into the admin guard pipeline:
//! admission control, secret verification, optional token verification and
//! uniform error mapping around a business handler.

pub mod error;
pub mod ports;
pub mod services;
#[cfg(test)]
pub(crate) mod test_support;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
