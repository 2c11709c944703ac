use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// Media category of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "media_type", rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Post record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub s3_key: String,
    pub media_type: MediaType,
    pub file_size: i64,
    pub owner_id: i64,
    pub created_at: OffsetDateTime,
}

/// Post row joined with the owner's username.
#[derive(Debug, Clone, FromRow)]
pub struct PostWithOwner {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub s3_key: String,
    pub media_type: MediaType,
    pub file_size: i64,
    pub owner_id: i64,
    pub owner_username: String,
    pub created_at: OffsetDateTime,
}
