// Inkwell core
//
// DB-agnostic domain types shared by the server and its tests.
//
// Key design decisions:
// - Wire shapes live here; storage rows live with the storage layer
// - OpenAPI schemas are behind the `openapi` feature so tools that only need
//   the types do not pull in utoipa

// Telemetry (tracing subscriber setup)
pub mod telemetry;

// Domain entity types
pub mod post;
pub mod user;

// Re-exports for convenience
pub use post::{Author, Post};
pub use user::{User, UserRecord};
