use bytes::Bytes;
use tracing::{info, warn};

use crate::auth::repo_types::User;
use crate::error::{ApiError, ApiResult};
use crate::posts::dto::PostResponse;
use crate::posts::policy;
use crate::posts::repo_types::{MediaType, Post};
use crate::state::AppState;

pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub body: Bytes,
}

/// Validates the file, stores the bytes under a fresh key, then records the
/// post. No retries: a storage error propagates as-is, and an insert failure
/// after a successful put is reported with the orphaned key.
pub async fn create_post(
    state: &AppState,
    owner: &User,
    media: MediaType,
    title: &str,
    description: Option<&str>,
    file: UploadedFile,
) -> ApiResult<PostResponse> {
    policy::validate(media, &file.content_type, file.body.len())?;

    let key = policy::storage_key(media, owner.id, &file.filename);
    let file_size = file.body.len() as i64;

    state
        .storage
        .put_object(&key, file.body, &file.content_type)
        .await
        .map_err(ApiError::Storage)?;

    let post = match Post::insert(
        &state.db,
        title,
        description,
        &key,
        media,
        file_size,
        owner.id,
    )
    .await
    {
        Ok(p) => p,
        Err(e) => return Err(ApiError::Orphaned { key, source: e }),
    };

    info!(post_id = post.id, owner_id = owner.id, %media, file_size, "media uploaded");
    let media_url = state.storage.public_url(&key);
    Ok(PostResponse::from_post(post, &owner.username, media_url))
}

pub async fn delete_post(state: &AppState, user: &User, post_id: i64) -> ApiResult<()> {
    let post = Post::get(&state.db, post_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".into()))?;

    if post.owner_id != user.id {
        warn!(post_id, user_id = user.id, owner_id = post.owner_id, "delete denied");
        return Err(ApiError::Forbidden(
            "Not authorized to delete this post".into(),
        ));
    }

    // Object first, then the row; a failure in between leaves the row
    // pointing at a missing object rather than an unreachable orphan.
    state
        .storage
        .delete_object(&post.s3_key)
        .await
        .map_err(ApiError::Storage)?;
    Post::delete(&state.db, post_id).await?;

    info!(post_id, user_id = user.id, "post deleted");
    Ok(())
}
