use axum::http::{HeaderMap, header::AUTHORIZATION};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const TOKEN_MAC_MESSAGE: &[u8] = b"bearer-token";

/// Per-request data handed to GraphQL resolvers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub bearer_token: Option<String>,
}

impl RequestContext {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let bearer_token = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string);
        Self { bearer_token }
    }

    /// Compares MAC tags of both tokens in constant time.
    pub fn bearer_matches(&self, expected: &str) -> bool {
        let Some(given) = self.bearer_token.as_deref() else {
            return false;
        };
        let (Some(given), Some(expected)) = (token_mac(given), token_mac(expected)) else {
            return false;
        };
        let tag = expected.finalize().into_bytes();
        given.verify_slice(&tag).is_ok()
    }
}

fn token_mac(token: &str) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(token.as_bytes()).ok()?;
    mac.update(TOKEN_MAC_MESSAGE);
    Some(mac)
}
