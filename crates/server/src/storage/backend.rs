// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// This module provides a unified StorageBackend enum that can work with
// either PostgreSQL (production) or in-memory (dev mode) storage.

use std::sync::Arc;
use uuid::Uuid;

use super::error::StoreResult;
use super::memory::InMemoryDatabase;
use super::models::*;
use super::repositories::Database;

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory database (dev mode)
    InMemory(Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Create a PostgreSQL storage backend from a database URL and apply migrations
    pub async fn postgres(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let db = Database::from_url(database_url, max_connections).await?;
        db.migrate().await?;
        Ok(Self::Postgres(db))
    }

    /// Create an in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory(Arc::new(InMemoryDatabase::new()))
    }

    /// Short name for health output and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::InMemory(_) => "memory",
        }
    }

    // ============================================
    // Users (credential store)
    // ============================================

    pub async fn create_user(&self, input: CreateUserRow) -> StoreResult<UserRow> {
        match self {
            Self::Postgres(db) => db.create_user(input).await,
            Self::InMemory(db) => db.create_user(input).await,
        }
    }

    pub async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<UserRow>> {
        match self {
            Self::Postgres(db) => db.get_user_by_username(username).await,
            Self::InMemory(db) => db.get_user_by_username(username).await,
        }
    }

    pub async fn list_users(&self) -> StoreResult<Vec<UserRow>> {
        match self {
            Self::Postgres(db) => db.list_users().await,
            Self::InMemory(db) => db.list_users().await,
        }
    }

    // ============================================
    // Posts
    // ============================================

    pub async fn create_post(&self, input: CreatePostRow) -> StoreResult<PostRow> {
        match self {
            Self::Postgres(db) => db.create_post(input).await,
            Self::InMemory(db) => db.create_post(input).await,
        }
    }

    pub async fn get_post(&self, id: Uuid) -> StoreResult<Option<PostRow>> {
        match self {
            Self::Postgres(db) => db.get_post(id).await,
            Self::InMemory(db) => db.get_post(id).await,
        }
    }

    pub async fn list_posts(&self) -> StoreResult<Vec<PostRow>> {
        match self {
            Self::Postgres(db) => db.list_posts().await,
            Self::InMemory(db) => db.list_posts().await,
        }
    }

    pub async fn update_post(&self, id: Uuid, input: UpdatePost) -> StoreResult<Option<PostRow>> {
        match self {
            Self::Postgres(db) => db.update_post(id, input).await,
            Self::InMemory(db) => db.update_post(id, input).await,
        }
    }

    pub async fn delete_post(&self, id: Uuid) -> StoreResult<bool> {
        match self {
            Self::Postgres(db) => db.delete_post(id).await,
            Self::InMemory(db) => db.delete_post(id).await,
        }
    }
}
