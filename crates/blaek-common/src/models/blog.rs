use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Blog post model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Payload for POST /api/blogs.
///
/// Every field is optional at the serde level so that a missing field
/// surfaces as a validation error with a useful message instead of a
/// deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

/// Validated fields for a new blog, likes defaulted
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
}

/// Payload for PUT /api/blogs/{id}.
///
/// A field left out of the JSON body deserializes to `None` and is not
/// applied; a field that is present is applied as-is. This keeps
/// "omitted" and "explicitly empty" distinguishable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogUpdateRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

impl BlogUpdateRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.url.is_none() && self.likes.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_omitted_fields_are_none() {
        let req: BlogUpdateRequest = serde_json::from_str(r#"{"likes": 5}"#).unwrap();
        assert_eq!(req.likes, Some(5));
        assert!(req.title.is_none());
        assert!(req.author.is_none());
        assert!(req.url.is_none());
    }

    #[test]
    fn test_update_request_empty_string_is_present() {
        let req: BlogUpdateRequest = serde_json::from_str(r#"{"title": ""}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some(""));
        assert!(req.likes.is_none());
    }

    #[test]
    fn test_update_request_empty_body() {
        let req: BlogUpdateRequest = serde_json::from_str("{}").unwrap();
        assert!(req.is_empty());
    }

    #[test]
    fn test_new_blog_request_missing_fields_deserialize() {
        let req: NewBlogRequest = serde_json::from_str(r#"{"title": "Doraemon"}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("Doraemon"));
        assert!(req.author.is_none());
        assert!(req.url.is_none());
        assert!(req.likes.is_none());
    }
}
