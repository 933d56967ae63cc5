// Authentication configuration loaded from environment variables.
// Decision: AUTH_ prefix for all auth config

/// Default realm announced in `WWW-Authenticate`
pub const DEFAULT_REALM: &str = "inkwell";

/// Complete authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Realm sent with Basic challenges
    pub realm: String,
    /// Whether to disable signup (registration)
    pub disable_signup: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            realm: DEFAULT_REALM.to_string(),
            disable_signup: false,
        }
    }
}

impl AuthConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let realm = std::env::var("AUTH_REALM")
            .ok()
            .map(|s| sanitize_realm(&s))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_REALM.to_string());

        let disable_signup = std::env::var("AUTH_DISABLE_SIGNUP")
            .map(|s| s.to_lowercase() == "true" || s == "1")
            .unwrap_or(false);

        Self {
            realm,
            disable_signup,
        }
    }

    /// Value for the `WWW-Authenticate` header
    pub fn challenge(&self) -> String {
        format!("Basic realm=\"{}\"", self.realm)
    }

    pub fn signup_enabled(&self) -> bool {
        !self.disable_signup
    }
}

/// Realm is interpolated into a quoted header value
fn sanitize_realm(realm: &str) -> String {
    realm
        .trim()
        .chars()
        .filter(|c| *c != '"' && *c != '\\' && !c.is_control())
        .collect()
}
