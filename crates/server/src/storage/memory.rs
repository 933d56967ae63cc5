// In-memory storage implementation for dev mode
// Decision: Use parking_lot for thread-safe access
// Decision: UUIDs generated via uuid v7 (time-ordered)
//
// This implementation provides a PostgreSQL-compatible API backed by in-memory
// HashMaps, allowing the server to run without a database for development and tests.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use super::error::{StoreError, StoreResult};
use super::models::*;

/// In-memory database for dev mode
/// All data is stored in memory and lost on restart
#[derive(Default)]
pub struct InMemoryDatabase {
    users: RwLock<HashMap<Uuid, UserRow>>,
    posts: RwLock<HashMap<Uuid, PostRow>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, input: CreateUserRow) -> StoreResult<UserRow> {
        let username = input.username.trim();
        if username.is_empty() {
            return Err(StoreError::InvalidInput("username is empty".to_string()));
        }

        // Uniqueness check and insert happen under one write lock
        let mut users = self.users.write();
        if users.values().any(|u| u.username == username) {
            return Err(StoreError::DuplicateUsername);
        }

        let id = Uuid::now_v7();
        let row = UserRow {
            id,
            username: username.to_string(),
            first_name: input.first_name,
            last_name: input.last_name,
            password_hash: input.password_hash,
            created_at: Self::now(),
        };
        users.insert(id, row.clone());
        Ok(row)
    }

    pub async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<UserRow>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    pub async fn list_users(&self) -> StoreResult<Vec<UserRow>> {
        let mut result: Vec<_> = self.users.read().values().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(result)
    }

    // ============================================
    // Posts
    // ============================================

    pub async fn create_post(&self, input: CreatePostRow) -> StoreResult<PostRow> {
        let now = Self::now();
        let id = Uuid::now_v7();
        let row = PostRow {
            id,
            title: input.title,
            content: input.content,
            author_first_name: input.author.first_name,
            author_last_name: input.author.last_name,
            created_at: now,
            updated_at: now,
        };
        self.posts.write().insert(id, row.clone());
        Ok(row)
    }

    pub async fn get_post(&self, id: Uuid) -> StoreResult<Option<PostRow>> {
        Ok(self.posts.read().get(&id).cloned())
    }

    pub async fn list_posts(&self) -> StoreResult<Vec<PostRow>> {
        let mut result: Vec<_> = self.posts.read().values().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(result)
    }

    pub async fn update_post(&self, id: Uuid, input: UpdatePost) -> StoreResult<Option<PostRow>> {
        let mut posts = self.posts.write();
        if let Some(post) = posts.get_mut(&id) {
            if let Some(title) = input.title {
                post.title = title;
            }
            if let Some(content) = input.content {
                post.content = content;
            }
            if let Some(author) = input.author {
                post.author_first_name = author.first_name;
                post.author_last_name = author.last_name;
            }
            post.updated_at = Self::now();
            return Ok(Some(post.clone()));
        }
        Ok(None)
    }

    pub async fn delete_post(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.posts.write().remove(&id).is_some())
    }
}
