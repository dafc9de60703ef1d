//! Request identity inside a store.

use serde::{Deserialize, Serialize};
use vfl_core::Request;

/// A cache key uniquely identifying a stored response.
///
/// Identity is the request method, the full URL, and the values of a
/// configured subset of headers. The request mode deliberately does not
/// participate: a navigation and a subresource fetch of the same URL hit the
/// same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestKey(String);

impl RequestKey {
    /// Build the key for a request.
    ///
    /// `vary_headers` names the headers that participate in identity; absent
    /// headers contribute nothing, so two requests differing only in an
    /// absent vary header share an entry.
    pub fn new(request: &Request, vary_headers: &[String]) -> Self {
        let mut parts = vec![request.method.as_str().to_string(), request.url.to_string()];
        for name in vary_headers {
            if let Some(value) = request.header(name) {
                parts.push(format!("h:{}={}", name.to_lowercase(), value));
            }
        }
        Self(parts.join("|"))
    }

    /// Get the key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;
    use vfl_core::RequestMode;

    fn make_request(url: &str) -> Request {
        Request::get(Url::parse(url).unwrap())
    }

    #[test]
    fn test_same_request_same_key() {
        let a = RequestKey::new(&make_request("https://vfl.betpawa.app/index.html"), &[]);
        let b = RequestKey::new(&make_request("https://vfl.betpawa.app/index.html"), &[]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_url_and_method_differentiate() {
        let base = make_request("https://vfl.betpawa.app/picks");
        let other_url = make_request("https://vfl.betpawa.app/results");
        let other_method = Request::new(vfl_core::Method::Post, base.url.clone());

        let key = RequestKey::new(&base, &[]);
        assert_ne!(key, RequestKey::new(&other_url, &[]));
        assert_ne!(key, RequestKey::new(&other_method, &[]));
    }

    #[test]
    fn test_mode_does_not_differentiate() {
        let plain = make_request("https://vfl.betpawa.app/");
        let navigation = plain.clone().with_mode(RequestMode::Navigate);
        assert_eq!(
            RequestKey::new(&plain, &[]),
            RequestKey::new(&navigation, &[])
        );
    }

    #[test]
    fn test_vary_header_differentiates_when_present() {
        let vary = vec!["Accept-Language".to_string()];
        let en = make_request("https://fonts.gstatic.com/s/roboto.woff2")
            .with_header("Accept-Language", "en");
        let fr = make_request("https://fonts.gstatic.com/s/roboto.woff2")
            .with_header("Accept-Language", "fr");
        let absent = make_request("https://fonts.gstatic.com/s/roboto.woff2");

        assert_ne!(RequestKey::new(&en, &vary), RequestKey::new(&fr, &vary));
        assert_ne!(RequestKey::new(&en, &vary), RequestKey::new(&absent, &vary));
        assert_eq!(
            RequestKey::new(&absent, &vary),
            RequestKey::new(&absent, &[])
        );
    }
}
