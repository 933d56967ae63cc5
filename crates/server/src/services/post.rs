// Post service for business logic

use crate::storage::{
    models::{CreatePostRow, UpdatePost},
    StorageBackend, StoreError,
};
use inkwell_core::{Author, Post};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::api::posts::{CreatePostRequest, UpdatePostRequest};

#[derive(Debug, Error)]
pub enum PostError {
    #[error("Missing `{0}` in request body")]
    MissingField(&'static str),

    #[error("`{0}` must not be blank")]
    BlankField(&'static str),

    #[error("Request path id ({path}) and request body id ({body}) must match")]
    IdMismatch { path: Uuid, body: Uuid },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct PostService {
    db: Arc<StorageBackend>,
}

impl PostService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    pub async fn create(&self, req: CreatePostRequest) -> Result<Post, PostError> {
        let title = required(req.title, "title")?;
        let content = required(req.content, "content")?;
        let author = match req.author {
            Some(author) if has_name(&author) => author,
            _ => return Err(PostError::MissingField("author")),
        };

        let row = self
            .db
            .create_post(CreatePostRow {
                title,
                content,
                author,
            })
            .await?;
        Ok(Post::from(row))
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Post>, PostError> {
        let row = self.db.get_post(id).await?;
        Ok(row.map(Post::from))
    }

    pub async fn list(&self) -> Result<Vec<Post>, PostError> {
        let rows = self.db.list_posts().await?;
        Ok(rows.into_iter().map(Post::from).collect())
    }

    /// Update the title, content, and author fields that are present.
    ///
    /// A body `id`, when sent, must equal the path id. Fields that are sent
    /// must not be blank.
    pub async fn update(&self, id: Uuid, req: UpdatePostRequest) -> Result<Option<Post>, PostError> {
        if let Some(body_id) = req.id {
            if body_id != id {
                return Err(PostError::IdMismatch {
                    path: id,
                    body: body_id,
                });
            }
        }

        if req.title.as_deref().is_some_and(is_blank) {
            return Err(PostError::BlankField("title"));
        }
        if req.content.as_deref().is_some_and(is_blank) {
            return Err(PostError::BlankField("content"));
        }
        if req.author.as_ref().is_some_and(|a| !has_name(a)) {
            return Err(PostError::BlankField("author"));
        }

        let input = UpdatePost {
            title: req.title,
            content: req.content,
            author: req.author,
        };
        let row = self.db.update_post(id, input).await?;
        Ok(row.map(Post::from))
    }

    /// Delete a post; returns whether it existed
    pub async fn delete(&self, id: Uuid) -> Result<bool, PostError> {
        Ok(self.db.delete_post(id).await?)
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, PostError> {
    match value {
        Some(v) if !is_blank(&v) => Ok(v),
        _ => Err(PostError::MissingField(field)),
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn has_name(author: &Author) -> bool {
    !author.display_name().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> PostService {
        PostService::new(Arc::new(StorageBackend::in_memory()))
    }

    fn create_request() -> CreatePostRequest {
        CreatePostRequest {
            title: Some("Hello".to_string()),
            content: Some("World".to_string()),
            author: Some(Author::new("Ada", "Lovelace")),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = service();
        let post = service.create(create_request()).await.unwrap();

        assert_eq!(post.title, "Hello");
        assert_eq!(post.author, "Ada Lovelace");

        let fetched = service.get(post.id).await.unwrap().unwrap();
        assert_eq!(fetched, post);
    }

    #[tokio::test]
    async fn test_create_requires_fields() {
        let service = service();

        let mut req = create_request();
        req.title = None;
        let err = service.create(req).await.unwrap_err();
        assert_eq!(err.to_string(), "Missing `title` in request body");

        let mut req = create_request();
        req.content = Some("   ".to_string());
        let err = service.create(req).await.unwrap_err();
        assert!(matches!(err, PostError::MissingField("content")));

        let mut req = create_request();
        req.author = None;
        let err = service.create(req).await.unwrap_err();
        assert!(matches!(err, PostError::MissingField("author")));

        let mut req = create_request();
        req.author = Some(Author::new(" ", ""));
        let err = service.create(req).await.unwrap_err();
        assert!(matches!(err, PostError::MissingField("author")));

        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_fields() {
        let service = service();
        let post = service.create(create_request()).await.unwrap();

        let updated = service
            .update(
                post.id,
                UpdatePostRequest {
                    id: Some(post.id),
                    title: Some("cats cats cats".to_string()),
                    content: Some("dogs dogs dogs".to_string()),
                    author: Some(Author::new("foo", "bar")),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, post.id);
        assert_eq!(updated.title, "cats cats cats");
        assert_eq!(updated.content, "dogs dogs dogs");
        assert_eq!(updated.author, "foo bar");
        assert_eq!(updated.created, post.created);
    }

    #[tokio::test]
    async fn test_update_id_mismatch() {
        let service = service();
        let post = service.create(create_request()).await.unwrap();

        let err = service
            .update(
                post.id,
                UpdatePostRequest {
                    id: Some(Uuid::now_v7()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PostError::IdMismatch { .. }));

        let unchanged = service.get(post.id).await.unwrap().unwrap();
        assert_eq!(unchanged.title, "Hello");
    }

    #[tokio::test]
    async fn test_update_rejects_blank_fields() {
        let service = service();
        let post = service.create(create_request()).await.unwrap();

        let cases = [
            (
                UpdatePostRequest {
                    title: Some(String::new()),
                    ..Default::default()
                },
                "title",
            ),
            (
                UpdatePostRequest {
                    content: Some("   ".to_string()),
                    ..Default::default()
                },
                "content",
            ),
            (
                UpdatePostRequest {
                    author: Some(Author::default()),
                    ..Default::default()
                },
                "author",
            ),
        ];

        for (req, field) in cases {
            let err = service.update(post.id, req).await.unwrap_err();
            assert!(
                matches!(err, PostError::BlankField(f) if f == field),
                "{}: {:?}",
                field,
                err
            );
        }

        let unchanged = service.get(post.id).await.unwrap().unwrap();
        assert_eq!(unchanged, post);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_post() {
        let service = service();
        let missing = Uuid::now_v7();

        assert!(service
            .update(missing, UpdatePostRequest::default())
            .await
            .unwrap()
            .is_none());
        assert!(!service.delete(missing).await.unwrap());
    }
}
