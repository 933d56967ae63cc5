// Database models (internal, may differ from public DTOs)

use chrono::{DateTime, Utc};
use inkwell_core::{Author, Post, User, UserRecord};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================
// Users
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// Public view, without the password hash
    pub fn to_user(&self) -> User {
        User {
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            password_hash: row.password_hash,
            created: row.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateUserRow {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

// ============================================
// Posts
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_first_name: String,
    pub author_last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostRow {
    pub fn author(&self) -> Author {
        Author::new(&self.author_first_name, &self.author_last_name)
    }
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            author: row.author().display_name(),
            id: row.id,
            title: row.title,
            content: row.content,
            created: row.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreatePostRow {
    pub title: String,
    pub content: String,
    pub author: Author,
}

/// Partial update; `None` leaves the column unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<Author>,
}
