// HTTP API routes
//
// This module contains all HTTP route handlers for the public API.
// Each submodule handles a specific resource type with its own state.

pub mod common;
pub mod posts;
pub mod users;
pub mod validation;

// Re-export common types
pub use common::ErrorResponse;
