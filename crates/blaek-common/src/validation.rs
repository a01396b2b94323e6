use crate::models::blog::{BlogUpdateRequest, NewBlog, NewBlogRequest};
use anyhow::{Result, bail};

/// Minimum length for usernames and passwords
pub const MIN_CREDENTIAL_LEN: usize = 3;

/// Validate a create-blog payload and fill in defaults.
///
/// Title, author and url must be present and non-empty. A missing `likes`
/// defaults to 0; an explicitly negative value is rejected.
pub fn validate_new_blog(req: &NewBlogRequest) -> Result<NewBlog> {
    let title = required_field(req.title.as_deref(), "title")?;
    let author = required_field(req.author.as_deref(), "author")?;
    let url = required_field(req.url.as_deref(), "url")?;

    let likes = match req.likes {
        None => 0,
        Some(n) if n < 0 => bail!("likes must not be negative"),
        Some(n) => n,
    };

    Ok(NewBlog {
        title: title.to_string(),
        author: author.to_string(),
        url: url.to_string(),
        likes,
    })
}

/// Validate an update-blog payload.
///
/// Only fields present in the payload are checked: a present-but-empty
/// title/author/url is rejected, as is a negative likes count. Absent
/// fields stay untouched on the stored blog.
pub fn validate_blog_update(req: &BlogUpdateRequest) -> Result<()> {
    for (value, field) in [
        (req.title.as_deref(), "title"),
        (req.author.as_deref(), "author"),
        (req.url.as_deref(), "url"),
    ] {
        if let Some(v) = value {
            if v.is_empty() {
                bail!("{} must not be empty", field);
            }
        }
    }

    if let Some(likes) = req.likes {
        if likes < 0 {
            bail!("likes must not be negative");
        }
    }

    Ok(())
}

/// Validate registration credentials (username and password length).
pub fn validate_credentials(username: &str, password: &str) -> Result<()> {
    if username.len() < MIN_CREDENTIAL_LEN {
        bail!(
            "username must be at least {} characters long",
            MIN_CREDENTIAL_LEN
        );
    }
    if password.len() < MIN_CREDENTIAL_LEN {
        bail!(
            "password must be at least {} characters long",
            MIN_CREDENTIAL_LEN
        );
    }
    Ok(())
}

fn required_field<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        Some(_) => bail!("{} must not be empty", field),
        None => bail!("{} is required", field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> NewBlogRequest {
        NewBlogRequest {
            title: Some("A Brief History of Time".to_string()),
            author: Some("Stephen Hawking".to_string()),
            url: Some("https://en.wikipedia.org/wiki/A_Brief_History_of_Time".to_string()),
            likes: Some(1001),
        }
    }

    #[test]
    fn test_valid_new_blog_passes() {
        let blog = validate_new_blog(&full_request()).unwrap();
        assert_eq!(blog.title, "A Brief History of Time");
        assert_eq!(blog.likes, 1001);
    }

    #[test]
    fn test_missing_likes_defaults_to_zero() {
        let mut req = full_request();
        req.likes = None;
        let blog = validate_new_blog(&req).unwrap();
        assert_eq!(blog.likes, 0);
    }

    #[test]
    fn test_negative_likes_rejected() {
        let mut req = full_request();
        req.likes = Some(-1);
        let err = validate_new_blog(&req).unwrap_err();
        assert!(err.to_string().contains("likes"));
    }

    #[test]
    fn test_missing_title_rejected() {
        let mut req = full_request();
        req.title = None;
        let err = validate_new_blog(&req).unwrap_err();
        assert_eq!(err.to_string(), "title is required");
    }

    #[test]
    fn test_empty_author_rejected() {
        let mut req = full_request();
        req.author = Some(String::new());
        let err = validate_new_blog(&req).unwrap_err();
        assert_eq!(err.to_string(), "author must not be empty");
    }

    #[test]
    fn test_missing_url_rejected() {
        let mut req = full_request();
        req.url = None;
        assert!(validate_new_blog(&req).is_err());
    }

    #[test]
    fn test_update_with_no_fields_is_valid() {
        validate_blog_update(&BlogUpdateRequest::default()).unwrap();
    }

    #[test]
    fn test_update_empty_title_rejected() {
        let req = BlogUpdateRequest {
            title: Some(String::new()),
            ..Default::default()
        };
        let err = validate_blog_update(&req).unwrap_err();
        assert_eq!(err.to_string(), "title must not be empty");
    }

    #[test]
    fn test_update_omitted_title_accepted() {
        let req = BlogUpdateRequest {
            likes: Some(7),
            ..Default::default()
        };
        validate_blog_update(&req).unwrap();
    }

    #[test]
    fn test_update_negative_likes_rejected() {
        let req = BlogUpdateRequest {
            likes: Some(-5),
            ..Default::default()
        };
        assert!(validate_blog_update(&req).is_err());
    }

    #[test]
    fn test_short_username_rejected() {
        let err = validate_credentials("ab", "sekret").unwrap_err();
        assert!(err.to_string().contains("username"));
    }

    #[test]
    fn test_short_password_rejected() {
        let err = validate_credentials("alice", "pw").unwrap_err();
        assert!(err.to_string().contains("password"));
    }

    #[test]
    fn test_minimum_length_credentials_accepted() {
        validate_credentials("bob", "abc").unwrap();
    }
}
