//! Framework-neutral view of an inbound request
//!
//! The guard only ever needs header lookup, the method and the path, so
//! it depends on this capability instead of a web framework's request type.

/// Read-only view of the parts of a request the guard inspects
pub trait InboundRequest {
    /// Value of the named header, if present and made of visible ASCII.
    ///
    /// Names are matched case-insensitively.
    fn header(&self, name: &str) -> Option<&str>;

    /// HTTP method, upper case
    fn method(&self) -> &str;

    /// Request path without query string
    fn path(&self) -> &str;
}
