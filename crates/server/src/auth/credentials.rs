// HTTP Basic credentials
// Decision: Any parse failure is reported as "no credentials", never as a distinct error

use axum::http::{header, HeaderMap};
use base64::{engine::general_purpose::STANDARD, Engine as _};

const BASIC_SCHEME: &str = "Basic";

/// Username/password pair submitted with a single request.
///
/// Lives only for one authentication check. `Debug` redacts the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Extract Basic credentials from the `Authorization` header, if well formed
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        Self::from_basic_header(value)
    }

    /// Parse `Basic base64(username:password)`.
    ///
    /// The scheme is case-insensitive. The password may itself contain `:`;
    /// only the first one separates the pair.
    pub fn from_basic_header(value: &str) -> Option<Self> {
        let (scheme, encoded) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case(BASIC_SCHEME) {
            return None;
        }

        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;

        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Encode as an `Authorization` header value (used by tests and clients)
    pub fn to_basic_header(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password);
        format!("{} {}", BASIC_SCHEME, STANDARD.encode(raw))
    }
}
