// Post domain types
//
// These types represent a blog post as returned by the public API.
// Storage rows keep the author's name split; the API joins it for display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Author of a post, stored as a first/last name pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Author's first name.
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "Ada"))]
    pub first_name: String,
    /// Author's last name.
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "Lovelace"))]
    pub last_name: String,
}

impl Author {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Display name: "first last", trimmed so a missing half leaves no stray space.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Post - a single blog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Post {
    /// Unique identifier for the post.
    pub id: Uuid,
    /// Post title.
    #[cfg_attr(feature = "openapi", schema(example = "Hello, world"))]
    pub title: String,
    /// Post body.
    pub content: String,
    /// Author display name ("first last").
    #[cfg_attr(feature = "openapi", schema(example = "Ada Lovelace"))]
    pub author: String,
    /// Timestamp when the post was created.
    pub created: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_display_name() {
        assert_eq!(Author::new("Ada", "Lovelace").display_name(), "Ada Lovelace");
        assert_eq!(Author::new("Ada", "").display_name(), "Ada");
        assert_eq!(Author::new("", "Lovelace").display_name(), "Lovelace");
        assert_eq!(Author::default().display_name(), "");
    }

    #[test]
    fn test_author_deserialize_camel_case() {
        let author: Author =
            serde_json::from_str(r#"{"firstName": "Grace", "lastName": "Hopper"}"#).unwrap();
        assert_eq!(author, Author::new("Grace", "Hopper"));

        let partial: Author = serde_json::from_str(r#"{"firstName": "Grace"}"#).unwrap();
        assert_eq!(partial.last_name, "");
    }

    #[test]
    fn test_post_serialization_keys() {
        let post = Post {
            id: Uuid::now_v7(),
            title: "Title".to_string(),
            content: "Body".to_string(),
            author: "Ada Lovelace".to_string(),
            created: Utc::now(),
        };

        let value = serde_json::to_value(&post).unwrap();
        let obj = value.as_object().unwrap();
        for key in ["id", "title", "content", "author", "created"] {
            assert!(obj.contains_key(key), "missing key {}", key);
        }
        assert_eq!(obj["author"], "Ada Lovelace");
    }
}
