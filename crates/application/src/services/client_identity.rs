//! Client identity resolution from proxy headers

use domain::ClientId;

use crate::ports::InboundRequest;

/// Proxy chain header; the first entry is the original client
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
/// Single-address header set by some reverse proxies
pub const X_REAL_IP: &str = "x-real-ip";

/// Derive the rate-limit key for a request.
///
/// Order: first `X-Forwarded-For` entry, then `X-Real-IP`, then the shared
/// `unknown` sentinel. Values are trimmed but not validated; blank values
/// fall through to the next source.
pub fn resolve_client_id<R: InboundRequest + ?Sized>(request: &R) -> ClientId {
    let forwarded = request
        .header(X_FORWARDED_FOR)
        .and_then(|chain| chain.split(',').next())
        .map(str::trim)
        .filter(|first| !first.is_empty());

    let real_ip = || {
        request
            .header(X_REAL_IP)
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
    };

    forwarded
        .or_else(real_ip)
        .map_or_else(ClientId::unknown, ClientId::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeRequest;

    #[test]
    fn prefers_first_forwarded_entry() {
        let req = FakeRequest::post("/api/admin/x")
            .with_header("X-Forwarded-For", " 1.2.3.4 , 10.0.0.1, 10.0.0.2")
            .with_header("X-Real-IP", "9.9.9.9");
        assert_eq!(resolve_client_id(&req).as_str(), "1.2.3.4");
    }

    #[test]
    fn falls_back_to_real_ip() {
        let req = FakeRequest::post("/api/admin/x").with_header("x-real-ip", "9.9.9.9");
        assert_eq!(resolve_client_id(&req).as_str(), "9.9.9.9");
    }

    #[test]
    fn blank_forwarded_entry_falls_through() {
        let req = FakeRequest::post("/api/admin/x")
            .with_header("x-forwarded-for", " , 1.2.3.4")
            .with_header("x-real-ip", "9.9.9.9");
        assert_eq!(resolve_client_id(&req).as_str(), "9.9.9.9");
    }

    #[test]
    fn no_headers_yield_shared_unknown_bucket() {
        let a = resolve_client_id(&FakeRequest::post("/a"));
        let b = resolve_client_id(&FakeRequest::post("/b"));
        assert!(a.is_unknown());
        assert_eq!(a, b);
    }

    #[test]
    fn value_is_not_validated() {
        let req = FakeRequest::post("/a").with_header("x-forwarded-for", "definitely-not-an-ip");
        assert_eq!(resolve_client_id(&req).as_str(), "definitely-not-an-ip");
    }
}
