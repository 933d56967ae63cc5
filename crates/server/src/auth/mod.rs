// Authentication module
//
// Supports HTTP Basic authentication with Argon2id password hashes.
// - password: hashing and verification
// - credentials: Basic header parsing
// - authenticator: username/password check against the credential store
// - middleware: the `AuthUser` extractor that gates privileged routes

pub mod authenticator;
pub mod config;
pub mod credentials;
pub mod middleware;
pub mod password;

pub use authenticator::{AuthResult, Authenticator, RejectReason};
pub use config::AuthConfig;
pub use credentials::Credentials;
pub use middleware::{AuthError, AuthState, AuthUser};
