//! Aggregations over blog collections, used by reporting and tests.

use crate::models::blog::Blog;

/// Sum of likes across all blogs.
pub fn total_likes(blogs: &[Blog]) -> i64 {
    blogs.iter().map(|b| b.likes).sum()
}

/// The blog with the most likes. Earlier entries win ties.
pub fn favorite_blog(blogs: &[Blog]) -> Option<&Blog> {
    blogs
        .iter()
        .fold(None, |best: Option<&Blog>, blog| match best {
            Some(b) if b.likes >= blog.likes => Some(b),
            _ => Some(blog),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn blog(title: &str, author: &str, likes: i64) -> Blog {
        Blog {
            id: Uuid::new_v4(),
            title: title.to_string(),
            author: author.to_string(),
            url: format!("https://example.com/{}", title.to_lowercase().replace(' ', "-")),
            likes,
            owner_id: None,
            created_at: Utc::now(),
        }
    }

    fn sample_list() -> Vec<Blog> {
        vec![
            blog("A Brief History of Time", "Stephen Hawking", 1001),
            blog("Doraemon", "Fujiko Fujio", 1000),
            blog("Cracking the Coding Interview", "McDowell", 1234),
        ]
    }

    #[test]
    fn test_total_likes_of_empty_list_is_zero() {
        assert_eq!(total_likes(&[]), 0);
    }

    #[test]
    fn test_total_likes_of_single_blog_equals_its_likes() {
        let blogs = vec![blog("Doraemon", "Fujiko Fujio", 1000)];
        assert_eq!(total_likes(&blogs), 1000);
    }

    #[test]
    fn test_total_likes_of_bigger_list() {
        assert_eq!(total_likes(&sample_list()), 3235);
    }

    #[test]
    fn test_favorite_of_empty_list_is_none() {
        assert!(favorite_blog(&[]).is_none());
    }

    #[test]
    fn test_favorite_is_blog_with_most_likes() {
        let blogs = sample_list();
        let favorite = favorite_blog(&blogs).unwrap();
        assert_eq!(favorite.title, "Cracking the Coding Interview");
        assert_eq!(favorite.likes, 1234);
    }

    #[test]
    fn test_favorite_tie_keeps_first() {
        let blogs = vec![
            blog("First", "A", 10),
            blog("Second", "B", 10),
        ];
        assert_eq!(favorite_blog(&blogs).unwrap().title, "First");
    }
}
