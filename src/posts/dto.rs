use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::posts::repo_types::{MediaType, Post, PostWithOwner};

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}
fn default_limit() -> i64 {
    20
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub media_url: String,
    pub media_type: MediaType,
    pub file_size: i64,
    pub owner_id: i64,
    pub owner_username: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl PostResponse {
    pub fn from_post(post: Post, owner_username: &str, media_url: String) -> Self {
        Self {
            id: post.id,
            title: post.title,
            description: post.description,
            media_url,
            media_type: post.media_type,
            file_size: post.file_size,
            owner_id: post.owner_id,
            owner_username: owner_username.to_string(),
            created_at: post.created_at,
        }
    }

    pub fn from_row(row: PostWithOwner, media_url: String) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            media_url,
            media_type: row.media_type,
            file_size: row.file_size,
            owner_id: row.owner_id,
            owner_username: row.owner_username,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_serializes_lowercase() {
        let row = PostWithOwner {
            id: 1,
            title: "sunset".into(),
            description: None,
            s3_key: "images/1/abc.png".into(),
            media_type: MediaType::Image,
            file_size: 1024,
            owner_id: 1,
            owner_username: "tester".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let json =
            serde_json::to_string(&PostResponse::from_row(row, "https://x/images/1/abc.png".into()))
                .unwrap();
        assert!(json.contains(r#""media_type":"image""#));
        assert!(json.contains("tester"));
        // the raw key is not part of the response, only the public URL
        assert!(!json.contains(r#""s3_key""#));
    }
}
