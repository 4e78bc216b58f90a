use super::user::{User, UserId};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

pub type PostId = i32;

/// Number of characters kept by [`Post::text_snippet`].
pub const SNIPPET_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub text: String,

    /// "first last" of the creator at the time the post was created.
    pub creator_name: String,
    pub creator_id: UserId,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// The first [`SNIPPET_LENGTH`] characters of the body.
    pub fn text_snippet(&self) -> &str {
        match self.text.char_indices().nth(SNIPPET_LENGTH) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.creator_id == user_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub text: String,
    pub creator_name: String,
    pub creator_id: UserId,
}

impl NewPost {
    /// Builds the row for `creator`, snapshotting its display name.
    pub fn new(title: String, text: String, creator: &User) -> Self {
        Self {
            title,
            text,
            creator_name: creator.display_name(),
            creator_id: creator.id,
        }
    }
}

/// Current time truncated to millisecond precision, the resolution of
/// pagination cursors.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_with_text(text: &str) -> Post {
        let now = now_millis();
        Post {
            id: 1,
            title: "T".to_string(),
            text: text.to_string(),
            creator_name: "Ada Lovelace".to_string(),
            creator_id: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_snippet_truncates_long_text() {
        let post = post_with_text(&"x".repeat(60));
        assert_eq!(post.text_snippet(), "x".repeat(50));
    }

    #[test]
    fn test_snippet_keeps_short_text() {
        let post = post_with_text("short body");
        assert_eq!(post.text_snippet(), "short body");

        let exact = post_with_text(&"y".repeat(50));
        assert_eq!(exact.text_snippet().len(), 50);
    }

    #[test]
    fn test_snippet_counts_characters_not_bytes() {
        let post = post_with_text(&"é".repeat(55));
        assert_eq!(post.text_snippet().chars().count(), 50);
    }

    #[test]
    fn test_new_post_snapshots_creator_name() {
        let user = User::new(7, "Ada".to_string(), "Lovelace".to_string());
        let new_post = NewPost::new("T".to_string(), "x".to_string(), &user);
        assert_eq!(new_post.creator_name, "Ada Lovelace");
        assert_eq!(new_post.creator_id, 7);
    }

    #[test]
    fn test_now_millis_has_no_sub_millisecond_part() {
        let now = now_millis();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
