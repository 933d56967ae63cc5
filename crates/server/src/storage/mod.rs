// Storage layer for Inkwell
// Decision: Support both PostgreSQL (production) and in-memory (dev mode)
//
// - Database: PostgreSQL repository (sqlx)
// - InMemoryDatabase: HashMap-backed store for dev mode and tests
// - StorageBackend: enum dispatch over the two; this is what the rest of the
//   server holds (behind an Arc) as the credential store and post repository

pub mod backend;
pub mod error;
pub mod memory;
pub mod models;
pub mod repositories;

pub use backend::StorageBackend;
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryDatabase;
pub use models::*;
pub use repositories::Database;
